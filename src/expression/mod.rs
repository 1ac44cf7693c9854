//! Finger position → expression values.
//!
//! Horizontal position within a zone maps to MPE pitch bend, vertical
//! position to velocity/intensity. Both sit on one clamped linear map.
//! Top of a zone is the softest (0), bottom the loudest (127); the zone's
//! left edge bends fully down, the right edge fully up. Zero-size axes
//! produce neutral values instead of dividing by zero.

use crate::layout::ZoneRect;

/// Pitch-bend magnitude, symmetric around zero.
pub const PITCH_BEND_MAX: i16 = 8191;
/// Velocity/intensity ceiling.
pub const LEVEL_MAX: u8 = 127;

/// Clamped linear interpolation.
///
/// Degenerate source ranges (from_low == from_high) return to_low; the
/// result is always clamped into the target interval, whichever way
/// around its ends are given.
pub fn map_range(value: f32, from_low: f32, from_high: f32, to_low: f32, to_high: f32) -> f32 {
    if from_low == from_high {
        return to_low;
    }
    let t = (value - from_low) / (from_high - from_low);
    let mapped = to_low + t * (to_high - to_low);
    let (min, max) = if to_low <= to_high {
        (to_low, to_high)
    } else {
        (to_high, to_low)
    };
    mapped.clamp(min, max)
}

/// Pitch bend from the horizontal position inside a zone: left edge
/// -8191, center 0, right edge +8191. Zero-width zones return 0.
pub fn pitch_bend_for_x(finger_x: f32, rect: ZoneRect) -> i16 {
    if rect.width <= 0.0 {
        return 0;
    }
    let relative = ((finger_x - rect.x) / rect.width).clamp(0.0, 1.0);
    map_range(
        relative,
        0.0,
        1.0,
        -(PITCH_BEND_MAX as f32),
        PITCH_BEND_MAX as f32,
    )
    .round() as i16
}

/// Velocity/intensity from the vertical position inside a zone: top edge
/// 0, bottom edge 127. Zero-height zones return 0.
///
/// The same curve serves the one-shot velocity at claim time and the
/// per-frame intensity while the claim holds.
pub fn level_for_y(finger_y: f32, rect: ZoneRect) -> u8 {
    if rect.height <= 0.0 {
        return 0;
    }
    let relative = ((finger_y - rect.y) / rect.height).clamp(0.0, 1.0);
    map_range(relative, 0.0, 1.0, 0.0, LEVEL_MAX as f32).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_interpolates_and_clamps() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(map_range(-5.0, 0.0, 10.0, 0.0, 100.0), 0.0);
        assert_eq!(map_range(15.0, 0.0, 10.0, 0.0, 100.0), 100.0);
        // Inverted target interval still clamps correctly.
        assert_eq!(map_range(0.0, 0.0, 10.0, 100.0, 0.0), 100.0);
        assert_eq!(map_range(10.0, 0.0, 10.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn degenerate_source_range_returns_to_low() {
        assert_eq!(map_range(7.0, 3.0, 3.0, -50.0, 50.0), -50.0);
    }

    #[test]
    fn pitch_bend_endpoints_and_center() {
        let rect = ZoneRect::new(100.0, 0.0, 200.0, 100.0);
        assert_eq!(pitch_bend_for_x(100.0, rect), -8191);
        assert_eq!(pitch_bend_for_x(200.0, rect), 0);
        assert_eq!(pitch_bend_for_x(300.0, rect), 8191);
    }

    #[test]
    fn pitch_bend_clamps_outside_the_zone() {
        let rect = ZoneRect::new(100.0, 0.0, 200.0, 100.0);
        assert_eq!(pitch_bend_for_x(50.0, rect), -8191);
        assert_eq!(pitch_bend_for_x(400.0, rect), 8191);
    }

    #[test]
    fn pitch_bend_is_monotonic_in_x() {
        let rect = ZoneRect::new(100.0, 0.0, 200.0, 100.0);
        let mut previous = i16::MIN;
        for step in 0..=80 {
            let x = 90.0 + step as f32 * 2.75;
            let bend = pitch_bend_for_x(x, rect);
            assert!(bend >= previous, "bend regressed at x={}", x);
            previous = bend;
        }
    }

    #[test]
    fn level_endpoints_and_midpoint() {
        let rect = ZoneRect::new(50.0, 100.0, 100.0, 200.0);
        assert_eq!(level_for_y(100.0, rect), 0);
        assert_eq!(level_for_y(300.0, rect), 127);
        assert_eq!(level_for_y(200.0, rect), 64);
    }

    #[test]
    fn level_clamps_outside_the_zone() {
        let rect = ZoneRect::new(50.0, 100.0, 100.0, 200.0);
        assert_eq!(level_for_y(0.0, rect), 0);
        assert_eq!(level_for_y(1000.0, rect), 127);
    }

    #[test]
    fn zero_size_zones_produce_neutral_values() {
        let flat = ZoneRect::new(10.0, 10.0, 0.0, 100.0);
        assert_eq!(pitch_bend_for_x(10.0, flat), 0);
        let thin = ZoneRect::new(10.0, 10.0, 100.0, 0.0);
        assert_eq!(level_for_y(10.0, thin), 0);
    }
}
