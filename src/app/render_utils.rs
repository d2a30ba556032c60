use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

use crate::sim::{HighlightLine, HighlightNode};
use crate::util::remap_clamped;

pub(super) fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

pub(super) fn with_alpha(color: [u8; 3], alpha: f32) -> Color32 {
    let alpha = alpha.clamp(0.0, 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], alpha)
}

pub(super) fn horizon_alpha(y: f32, visible_height: f32) -> f32 {
    remap_clamped(y, 0.0, visible_height, 255.0, 0.0)
}

pub(super) fn visible_height(surface_height: f32, percentage: f32) -> f32 {
    surface_height * (percentage / 100.0)
}

pub(super) fn line_style(
    line: &HighlightLine,
    start: &HighlightNode,
    end: &HighlightNode,
    max_width: f32,
) -> (f32, f32) {
    let alpha = start.opacity.min(end.opacity) * line.progress;
    (alpha, max_width * line.progress)
}

pub(super) fn to_screen(rect: Rect, position: Vec2) -> Pos2 {
    rect.min + position
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, color: Color32) {
    painter.rect_filled(rect, 0.0, color);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::config::BackdropConfig;
    use crate::sim::Simulation;

    #[test]
    fn horizon_fade_spans_visible_band() {
        let visible = visible_height(600.0, 80.0);
        assert_abs_diff_eq!(visible, 480.0);
        assert_abs_diff_eq!(horizon_alpha(-25.0, visible), 255.0);
        assert_abs_diff_eq!(horizon_alpha(0.0, visible), 255.0);
        assert_abs_diff_eq!(horizon_alpha(240.0, visible), 127.5);
        assert_abs_diff_eq!(horizon_alpha(480.0, visible), 0.0);
        assert_abs_diff_eq!(horizon_alpha(590.0, visible), 0.0);
    }

    #[test]
    fn alpha_is_clamped_and_rounded() {
        assert_eq!(with_alpha([56, 60, 70], 127.6).a(), 128);
        assert_eq!(with_alpha([255, 255, 255], 900.0).a(), 255);
        assert_eq!(with_alpha([255, 255, 255], -3.0).a(), 0);
        assert_eq!(with_alpha([22, 23, 40], 255.0), rgb([22, 23, 40]));
    }

    #[test]
    fn line_fades_with_dimmer_endpoint_and_progress() {
        let sim = Simulation::new(BackdropConfig::default(), vec2(50.0, 50.0));
        let node = |x: f32, opacity| HighlightNode {
            dot: sim.field().nearest_dot(vec2(x, 0.0)).unwrap(),
            radius: 3.0,
            target_radius: 3.0,
            opacity,
        };
        let a = node(0.0, 30.0);
        let b = node(25.0, 10.0);
        let line = HighlightLine {
            start: a.dot,
            end: b.dot,
            progress: 0.5,
        };

        let (alpha, width) = line_style(&line, &a, &b, 2.0);
        assert_abs_diff_eq!(alpha, 5.0);
        assert_abs_diff_eq!(width, 1.0);
    }

    #[test]
    fn surface_positions_are_offset_by_rect_origin() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 100.0));
        assert_eq!(to_screen(rect, vec2(5.0, 5.0)), pos2(15.0, 25.0));
    }
}
