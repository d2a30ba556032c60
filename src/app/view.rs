use eframe::egui::{Painter, Rect, Stroke};

use crate::sim::Simulation;

use super::render_utils::{
    draw_background, horizon_alpha, line_style, rgb, to_screen, visible_height, with_alpha,
};

pub(super) fn paint_frame(painter: &Painter, rect: Rect, sim: &Simulation) {
    draw_background(painter, rect, rgb(sim.config().palette.background));
    paint_dots(painter, rect, sim);
    paint_constellations(painter, rect, sim);
}

fn paint_dots(painter: &Painter, rect: Rect, sim: &Simulation) {
    let grid = &sim.config().grid;
    let [r, g, b, a] = sim.config().palette.dot;
    let base_alpha = f32::from(a) / 255.0;
    let max_visible_y = visible_height(rect.height(), grid.visible_height_percentage);
    let radius = grid.dot_size * 0.5;

    for dot in sim.field().dots() {
        let alpha = horizon_alpha(dot.position.y, max_visible_y) * base_alpha;
        if alpha < 0.5 {
            continue;
        }
        painter.circle_filled(
            to_screen(rect, dot.position),
            radius,
            with_alpha([r, g, b], alpha),
        );
    }
}

fn paint_constellations(painter: &Painter, rect: Rect, sim: &Simulation) {
    let config = sim.config();
    let highlight = config.palette.highlight;
    let field = sim.field();

    for constellation in sim.constellations() {
        for node in constellation.nodes() {
            let Some(dot) = field.dot(node.dot) else {
                continue;
            };
            painter.circle_filled(
                to_screen(rect, dot.position),
                node.radius,
                with_alpha(highlight, node.opacity),
            );
        }

        for line in constellation.lines() {
            let (Some(start), Some(end)) =
                (constellation.node_for(line.start), constellation.node_for(line.end))
            else {
                continue;
            };
            let (Some(start_dot), Some(end_dot)) = (field.dot(line.start), field.dot(line.end))
            else {
                continue;
            };

            let (alpha, width) =
                line_style(line, start, end, config.constellation.max_line_width);
            painter.line_segment(
                [
                    to_screen(rect, start_dot.position),
                    to_screen(rect, end_dot.position),
                ],
                Stroke::new(width, with_alpha(highlight, alpha)),
            );
        }
    }
}
