//! Interpolation helpers для crosshair/FOV моделей

/// Экспоненциальная интерполяция к target (frame-rate independent)
///
/// Семантика: за один вызов current сдвигается к target на долю
/// `delta_time * interp_speed` оставшейся дистанции (clamped к 1.0),
/// при почти нулевой дистанции схлопывается в target.
pub fn finterp_to(current: f32, target: f32, delta_time: f32, interp_speed: f32) -> f32 {
    if interp_speed <= 0.0 {
        return target;
    }
    let dist = target - current;
    if dist * dist < 1.0e-8 {
        return target;
    }
    let delta_move = dist * (delta_time * interp_speed).clamp(0.0, 1.0);
    current + delta_move
}

/// Линейный map из input range в output range с clamp по краям
pub fn map_range_clamped(
    value: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
) -> f32 {
    let span = in_max - in_min;
    if span.abs() < f32::EPSILON {
        return out_min;
    }
    let pct = ((value - in_min) / span).clamp(0.0, 1.0);
    out_min + pct * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finterp_moves_toward_target() {
        let next = finterp_to(0.0, 1.0, 0.1, 5.0);
        assert!(next > 0.0 && next < 1.0);
        assert!((next - 0.5).abs() < 1.0e-6); // 0.1 * 5.0 = 50% дистанции
    }

    #[test]
    fn test_finterp_clamps_overshoot() {
        // delta_time * speed > 1 → сразу target, без перелёта
        assert_eq!(finterp_to(0.0, 1.0, 1.0, 20.0), 1.0);
    }

    #[test]
    fn test_finterp_snaps_when_close() {
        assert_eq!(finterp_to(0.99999, 1.0, 0.001, 1.0), 1.0);
    }

    #[test]
    fn test_finterp_zero_speed_returns_target() {
        assert_eq!(finterp_to(0.0, 3.0, 0.016, 0.0), 3.0);
    }

    #[test]
    fn test_map_range_clamped() {
        assert_eq!(map_range_clamped(300.0, 0.0, 600.0, 0.0, 1.0), 0.5);
        assert_eq!(map_range_clamped(-50.0, 0.0, 600.0, 0.0, 1.0), 0.0);
        assert_eq!(map_range_clamped(900.0, 0.0, 600.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        // max_speed == 0 (стоим на месте) не должен давать NaN
        assert_eq!(map_range_clamped(10.0, 0.0, 0.0, 0.0, 1.0), 0.0);
    }
}
