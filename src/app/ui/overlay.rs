use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Stroke, vec2};

use crate::sim::{PointerSample, Simulation};

use super::super::render_utils::{rgb, to_screen};

pub(in crate::app) fn overlay_lines(
    sim: &Simulation,
    pointer: &PointerSample,
    fps_text: Option<String>,
) -> Vec<String> {
    let stats = sim.stats();
    let taper = pointer.attraction_taper(sim.config().metaballs.taper_duration_secs);

    let field = sim.field();
    let sectors = sim.sectors();

    let mut lines = vec![
        format!("Metaballs: {}", stats.metaballs),
        format!("Total Constellation Nodes: {}", stats.nodes),
        format!("Total Constellation Lines: {}", stats.lines),
        format!(
            "Dots: {} ({}x{}) in {}x{} sectors",
            stats.dots,
            field.cols(),
            field.rows(),
            sectors.cols(),
            sectors.rows()
        ),
        format!(
            "Pointer {}: attraction {:.0}%",
            if pointer.is_moving() { "moving" } else { "idle" },
            taper * 100.0
        ),
    ];
    for (index, ball) in sim.metaballs().iter().enumerate() {
        lines.push(format!(
            "#{index}: r {:.0} | strength {:.2} | speed {:.2}",
            ball.radius,
            ball.strength,
            ball.speed()
        ));
    }
    lines.extend(fps_text);
    lines
}

pub(in crate::app) fn paint_debug_overlay(
    painter: &Painter,
    rect: Rect,
    sim: &Simulation,
    pointer: &PointerSample,
    fps_text: Option<String>,
) {
    let config = sim.config();
    let stroke = Stroke::new(1.0, rgb(config.palette.debug));
    for ball in sim.metaballs() {
        let center = to_screen(rect, ball.position);
        painter.circle_stroke(center, ball.radius, stroke);
        painter.circle_stroke(center, config.constellation.influence_radius, stroke);
    }

    for (row, line) in overlay_lines(sim, pointer, fps_text).into_iter().enumerate() {
        painter.text(
            rect.min + vec2(10.0, 10.0 + row as f32 * 20.0),
            Align2::LEFT_TOP,
            line,
            FontId::monospace(12.0),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::Vec2;

    use super::*;
    use crate::config::BackdropConfig;

    #[test]
    fn overlay_reports_live_counts() {
        let config = BackdropConfig {
            seed: Some(4),
            ..BackdropConfig::default()
        };
        let mut sim = Simulation::new(config, vec2(800.0, 600.0));
        sim.step(Some(vec2(10.0, 10.0)), 0.0);
        let sample = sim.step(Some(vec2(14.0, 10.0)), 0.016);

        let lines = overlay_lines(&sim, &sample, Some("FPS 60".to_owned()));
        assert_eq!(lines[0], "Metaballs: 3");
        assert_eq!(lines[3], "Dots: 884 (34x26) in 2x2 sectors");
        assert_eq!(lines[4], "Pointer moving: attraction 100%");
        assert_eq!(lines.len(), 5 + 3 + 1);
        assert_eq!(lines.last().map(String::as_str), Some("FPS 60"));

        let idle = PointerSample {
            position: Vec2::ZERO,
            delta: Vec2::ZERO,
            idle_secs: 60.0,
        };
        let lines = overlay_lines(&sim, &idle, None);
        assert_eq!(lines[4], "Pointer idle: attraction 0%");
        assert_eq!(lines.len(), 5 + 3);
    }
}
