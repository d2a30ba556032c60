use eframe::egui::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct PointerSample {
    pub position: Vec2,
    pub delta: Vec2,
    pub idle_secs: f64,
}

impl PointerSample {
    pub fn is_moving(&self) -> bool {
        self.delta != Vec2::ZERO
    }

    pub fn attraction_taper(&self, duration_secs: f64) -> f32 {
        if duration_secs <= 0.0 {
            return 0.0;
        }
        (1.0 - self.idle_secs / duration_secs).max(0.0) as f32
    }
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    held_position: Vec2,
    previous: Option<Vec2>,
    last_move_secs: Option<f64>,
}

impl PointerTracker {
    /// Movement is only measured between two frames that both saw the pointer; the frame it
    /// enters or re-enters the surface reports a zero delta.
    pub fn sample(&mut self, pointer: Option<Vec2>, now_secs: f64) -> PointerSample {
        let position = pointer.unwrap_or(self.held_position);
        let delta = match (pointer, self.previous) {
            (Some(current), Some(previous)) => current - previous,
            _ => Vec2::ZERO,
        };

        let last_move = self.last_move_secs.get_or_insert(now_secs);
        if delta != Vec2::ZERO {
            *last_move = now_secs;
        }
        let idle_secs = (now_secs - *last_move).max(0.0);

        self.held_position = position;
        self.previous = pointer;

        PointerSample {
            position,
            delta,
            idle_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn entering_the_surface_reports_no_motion() {
        let mut tracker = PointerTracker::default();
        let first = tracker.sample(Some(vec2(700.0, 400.0)), 0.0);
        assert_eq!(first.delta, Vec2::ZERO);
        assert_eq!(first.position, vec2(700.0, 400.0));

        tracker.sample(Some(vec2(20.0, 400.0)), 0.016);
        let away = tracker.sample(None, 0.032);
        assert_eq!(away.position, vec2(20.0, 400.0));
        assert_eq!(away.delta, Vec2::ZERO);

        let back = tracker.sample(Some(vec2(1420.0, 400.0)), 0.048);
        assert_eq!(back.position, vec2(1420.0, 400.0));
        assert_eq!(back.delta, Vec2::ZERO);
        assert!(!back.is_moving());

        let next = tracker.sample(Some(vec2(1410.0, 400.0)), 0.064);
        assert_eq!(next.delta, vec2(-10.0, 0.0));
    }

    #[test]
    fn delta_is_measured_against_previous_frame() {
        let mut tracker = PointerTracker::default();
        tracker.sample(Some(vec2(10.0, 10.0)), 0.0);
        let sample = tracker.sample(Some(vec2(13.0, 6.0)), 0.016);

        assert_eq!(sample.delta, vec2(3.0, -4.0));
        assert!(sample.is_moving());
        assert_abs_diff_eq!(sample.idle_secs, 0.0);
    }

    #[test]
    fn missing_pointer_holds_last_position() {
        let mut tracker = PointerTracker::default();
        tracker.sample(Some(vec2(50.0, 70.0)), 0.0);
        let sample = tracker.sample(None, 1.0);

        assert_eq!(sample.position, vec2(50.0, 70.0));
        assert!(!sample.is_moving());
        assert_abs_diff_eq!(sample.idle_secs, 1.0);
    }

    #[test]
    fn taper_decays_to_zero_after_duration() {
        let mut tracker = PointerTracker::default();
        tracker.sample(Some(vec2(100.0, 100.0)), 0.0);

        let halfway = tracker.sample(Some(vec2(100.0, 100.0)), 5.0);
        assert_abs_diff_eq!(halfway.attraction_taper(10.0), 0.5, epsilon = 1e-6);

        let expired = tracker.sample(Some(vec2(100.0, 100.0)), 12.0);
        assert_eq!(expired.attraction_taper(10.0), 0.0);

        let moved = tracker.sample(Some(vec2(101.0, 100.0)), 13.0);
        assert_abs_diff_eq!(moved.attraction_taper(10.0), 1.0);
    }
}
