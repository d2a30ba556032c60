use std::collections::VecDeque;

use eframe::egui::Context;

const FPS_SAMPLE_WINDOW: usize = 180;

#[derive(Debug, Default)]
pub(in crate::app) struct FpsCounter {
    current: f32,
    samples: VecDeque<f32>,
}

impl FpsCounter {
    pub(in crate::app) fn update(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        self.record(dt);
    }

    fn record(&mut self, dt: f32) {
        if dt <= f32::EPSILON {
            return;
        }

        self.current = (1.0 / dt).clamp(0.0, 1000.0);
        self.samples.push_back(self.current);
        while self.samples.len() > FPS_SAMPLE_WINDOW {
            self.samples.pop_front();
        }
    }

    pub(in crate::app) fn display_text(&self) -> Option<String> {
        if self.samples.is_empty() {
            return None;
        }

        let avg = self.samples.iter().sum::<f32>() / self.samples.len() as f32;
        let mut parts = vec![format!("FPS {:.0}", self.current), format!("avg {avg:.1}")];
        if self.current > f32::EPSILON {
            parts.push(format!("{:.1} ms", 1000.0 / self.current));
        }

        Some(parts.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counter_has_no_text() {
        let mut counter = FpsCounter::default();
        counter.record(0.0);
        assert!(counter.display_text().is_none());
    }

    #[test]
    fn window_keeps_latest_samples() {
        let mut counter = FpsCounter::default();
        for _ in 0..FPS_SAMPLE_WINDOW {
            counter.record(1.0 / 30.0);
        }
        for _ in 0..FPS_SAMPLE_WINDOW {
            counter.record(1.0 / 60.0);
        }

        assert_eq!(counter.samples.len(), FPS_SAMPLE_WINDOW);
        assert_eq!(
            counter.display_text().as_deref(),
            Some("FPS 60 | avg 60.0 | 16.7 ms")
        );
    }
}
