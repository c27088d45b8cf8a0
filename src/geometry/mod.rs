//! Dial geometry module
//!
//! Angle/time conversion, pointer math and the drawable primitives derived
//! from a dial snapshot.

pub mod conversion;
pub mod render;

// Re-export main types
pub use conversion::{
    angle_to_point, angle_to_time, bearing, hit_test, normalize_angle, snap_seconds,
    time_to_angle, Point,
};
pub use render::{DialGeometry, DialPalette, Drawable, Rect, TextMetrics, DIAL_RADIUS, DIAL_SIZE};
