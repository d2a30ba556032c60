pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

pub fn lerp(from: f32, to: f32, amount: f32) -> f32 {
    from + (to - from) * amount
}

pub fn remap_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if (in_max - in_min).abs() <= f32::EPSILON {
        return out_min;
    }

    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    lerp(out_min, out_max, t)
}

pub fn clamp_or_center(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) * 0.5
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(40.0) <= 1.0);
        assert!(sigmoid(-40.0) >= 0.0);
        assert!(sigmoid(2.0) > sigmoid(1.0));
    }

    #[test]
    fn remap_clamps_outside_input_range() {
        assert_abs_diff_eq!(remap_clamped(-10.0, 0.0, 100.0, 255.0, 0.0), 255.0);
        assert_abs_diff_eq!(remap_clamped(50.0, 0.0, 100.0, 255.0, 0.0), 127.5);
        assert_abs_diff_eq!(remap_clamped(500.0, 0.0, 100.0, 255.0, 0.0), 0.0);
    }

    #[test]
    fn clamp_or_center_handles_inverted_range() {
        assert_abs_diff_eq!(clamp_or_center(5.0, 10.0, 0.0), 5.0);
        assert_abs_diff_eq!(clamp_or_center(-3.0, 0.0, 10.0), 0.0);
        assert_abs_diff_eq!(clamp_or_center(42.0, 0.0, 10.0), 10.0);
    }
}
