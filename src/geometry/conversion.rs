//! Angle/time mapping and polar helpers
//!
//! Angles are in degrees, 0° at 12 o'clock, growing clockwise. Points use
//! screen coordinates relative to the dial center (y grows downward).

use serde::{Deserialize, Serialize};

/// Snapping granularity while dragging: five minutes
pub const SNAP_SECONDS: f64 = 300.0;

/// Full turn in degrees
pub const FULL_TURN: f64 = 360.0;

/// A point relative to the dial center
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the dial center
    pub fn distance_from_center(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Both coordinates are real numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Convert a dial angle to seconds, optionally snapped to five minutes
pub fn angle_to_time(angle: f64, max_duration_seconds: u32, snapping: bool) -> f64 {
    let raw_seconds = angle / FULL_TURN * f64::from(max_duration_seconds);
    if snapping {
        snap_seconds(raw_seconds)
    } else {
        raw_seconds
    }
}

/// Inverse of [`angle_to_time`]
pub fn time_to_angle(seconds: f64, max_duration_seconds: u32) -> f64 {
    seconds / f64::from(max_duration_seconds) * FULL_TURN
}

/// Round seconds to the nearest five-minute multiple
pub fn snap_seconds(seconds: f64) -> f64 {
    (seconds / SNAP_SECONDS).round() * SNAP_SECONDS
}

/// Polar to Cartesian with 0° pointing up
pub fn angle_to_point(angle: f64, radius: f64) -> Point {
    let rad = (angle - 90.0).to_radians();
    Point::new(radius * rad.cos(), radius * rad.sin())
}

/// Fold an angle into [0, 360)
pub fn normalize_angle(angle: f64) -> f64 {
    let folded = angle % FULL_TURN;
    let folded = if folded < 0.0 { folded + FULL_TURN } else { folded };
    // tiny negatives round up to exactly 360
    if folded >= FULL_TURN { 0.0 } else { folded }
}

/// Bearing of a pointer position, clockwise from 12 o'clock, in [0, 360)
pub fn bearing(point: Point) -> f64 {
    normalize_angle(point.x.atan2(-point.y).to_degrees())
}

/// Whether a pointer position falls on the dial face
pub fn hit_test(point: Point, radius: f64) -> bool {
    point.is_finite() && point.distance_from_center() <= radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn time_angle_round_trip_over_full_range() {
        for max in [60u32, 1000, 3600, 7200] {
            for seconds in 0..=max {
                let angle = time_to_angle(f64::from(seconds), max);
                let back = angle_to_time(angle, max, false);
                assert!(
                    (back - f64::from(seconds)).abs() < 1e-6,
                    "max={max} seconds={seconds} back={back}"
                );
            }
        }
    }

    #[test]
    fn snapped_times_are_five_minute_multiples() {
        let mut angle = 0.0;
        while angle < 360.0 {
            let seconds = angle_to_time(angle, 3600, true);
            assert_eq!(seconds % 300.0, 0.0, "angle {angle} gave {seconds}");
            angle += 0.25;
        }
    }

    #[test]
    fn snapping_rounds_to_nearest() {
        assert_eq!(angle_to_time(14.0, 3600, true), 0.0);
        assert_eq!(angle_to_time(16.0, 3600, true), 300.0);
        assert_eq!(angle_to_time(180.0, 3600, true), 1800.0);
        assert_eq!(angle_to_time(359.0, 3600, true), 3600.0);
    }

    #[test]
    fn unsnapped_time_keeps_precision() {
        assert_close(angle_to_time(1.0, 3600, false), 10.0);
        assert_close(angle_to_time(150.0, 3600, false), 1500.0);
    }

    #[test]
    fn angle_to_point_starts_at_twelve_and_runs_clockwise() {
        let top = angle_to_point(0.0, 10.0);
        assert_close(top.x, 0.0);
        assert_close(top.y, -10.0);

        let right = angle_to_point(90.0, 10.0);
        assert_close(right.x, 10.0);
        assert_close(right.y, 0.0);

        let bottom = angle_to_point(180.0, 10.0);
        assert_close(bottom.x, 0.0);
        assert_close(bottom.y, 10.0);
    }

    #[test]
    fn bearing_inverts_angle_to_point() {
        for step in 0..72 {
            let angle = f64::from(step) * 5.0;
            let point = angle_to_point(angle, 42.0);
            let back = bearing(point);
            let diff = (back - angle).abs();
            assert!(diff < 1e-9 || (360.0 - diff) < 1e-9, "angle {angle} gave {back}");
        }
    }

    #[test]
    fn bearing_is_never_negative() {
        // left half of the dial yields negative atan2 results
        assert_close(bearing(Point::new(-10.0, 0.0)), 270.0);
        assert_close(bearing(Point::new(-10.0, -10.0)), 315.0);
    }

    #[test]
    fn normalize_folds_into_range() {
        assert_close(normalize_angle(-90.0), 270.0);
        assert_close(normalize_angle(360.0), 0.0);
        assert_close(normalize_angle(725.0), 5.0);
        assert_close(normalize_angle(45.0), 45.0);
    }

    #[test]
    fn hit_test_includes_rim() {
        assert!(hit_test(Point::new(0.0, -90.0), 90.0));
        assert!(hit_test(Point::new(30.0, 40.0), 50.0));
        assert!(!hit_test(Point::new(60.0, 70.0), 90.0));
    }

    #[test]
    fn hit_test_rejects_non_finite_points() {
        assert!(!hit_test(Point::new(f64::NAN, 0.0), 90.0));
        assert!(!hit_test(Point::new(0.0, f64::INFINITY), 90.0));
        assert!(!Point::new(f64::NEG_INFINITY, 1.0).is_finite());
    }
}
