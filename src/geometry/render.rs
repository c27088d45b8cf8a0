//! Drawable primitives computed from a dial snapshot
//!
//! Nothing here owns state: the same snapshot and text metrics always yield
//! the same [`DialGeometry`]. The drawing collaborator only has to fill discs,
//! the wedge, stroke tick lines and place label text at the given baselines.

use serde::{Deserialize, Serialize};

use super::conversion::{angle_to_point, Point};
use crate::state::DialSnapshot;

/// Dial diameter in scene units
pub const DIAL_SIZE: f64 = 180.0;
/// Dial radius, also the pointer hit radius
pub const DIAL_RADIUS: f64 = DIAL_SIZE / 2.0;

const HUB_RADIUS: f64 = 8.0;
const HANDLE_RADIUS: f64 = 4.0;
const HANDLE_INSET: f64 = 5.0;
const TICK_LENGTH: f64 = 10.0;
const LABEL_INSET: f64 = 25.0;
const SIXTY_LABEL_INSET: f64 = 38.0;
const SIXTY_LABEL_SHIFT: f64 = -12.0;
const TICK_STEP_MINUTES: usize = 5;

/// Measures label text in the collaborator's font
pub trait TextMetrics {
    fn text_width(&self, text: &str) -> f64;
    fn text_height(&self) -> f64;
}

/// Something that can be placed in a scene and painted from dial state
pub trait Drawable {
    fn bounding_rect(&self) -> Rect;
    fn paint(&self, metrics: &dyn TextMetrics) -> DialGeometry;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Square centered on the dial origin
    pub fn centered(size: f64) -> Self {
        Self {
            x: -size / 2.0,
            y: -size / 2.0,
            width: size,
            height: size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fill colors for each primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialPalette {
    pub dial: Rgb,
    pub remaining: Rgb,
    pub hub: Rgb,
    pub handle: Rgb,
    pub ticks: Rgb,
}

impl Default for DialPalette {
    fn default() -> Self {
        Self {
            dial: Rgb(192, 192, 192),
            remaining: Rgb(255, 0, 0),
            hub: Rgb(255, 255, 255),
            handle: Rgb(128, 0, 0),
            ticks: Rgb(0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: Point,
    pub radius: f64,
}

/// Pie wedge in painter convention: degrees counterclockwise from 3 o'clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub bounds: Rect,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Baseline origin of the text
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub minutes: u32,
    pub angle: f64,
    pub outer: Point,
    pub inner: Point,
    pub label: Label,
}

/// Everything needed to paint one frame of the dial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialGeometry {
    pub bounds: Rect,
    pub palette: DialPalette,
    pub background: Disc,
    pub remaining: Wedge,
    pub hub: Disc,
    pub ticks: Vec<TickMark>,
    /// Extra "60" label kept clear of the "0" label
    pub sixty_label: Option<Label>,
    pub handle: Disc,
}

impl DialGeometry {
    pub fn compute(snapshot: &DialSnapshot, metrics: &dyn TextMetrics) -> Self {
        Self::compute_with_palette(snapshot, metrics, DialPalette::default())
    }

    pub fn compute_with_palette(
        snapshot: &DialSnapshot,
        metrics: &dyn TextMetrics,
        palette: DialPalette,
    ) -> Self {
        let bounds = Rect::centered(DIAL_SIZE);
        let center = Point::default();
        let max_minutes = snapshot.max_minutes();

        let ticks = (0..max_minutes)
            .step_by(TICK_STEP_MINUTES)
            .map(|minutes| tick_mark(minutes, snapshot.max_duration_seconds, metrics))
            .collect();

        let sixty_label = (max_minutes >= 60).then(|| Label {
            text: "60".to_string(),
            position: angle_to_point(0.0, DIAL_RADIUS - SIXTY_LABEL_INSET)
                .offset(SIXTY_LABEL_SHIFT, 0.0),
        });

        Self {
            bounds,
            palette,
            background: Disc {
                center,
                radius: DIAL_RADIUS,
            },
            remaining: Wedge {
                bounds,
                start_angle: 90.0,
                sweep_angle: -snapshot.remaining_angle,
            },
            hub: Disc {
                center,
                radius: HUB_RADIUS,
            },
            ticks,
            sixty_label,
            handle: Disc {
                center: angle_to_point(snapshot.current_angle, DIAL_RADIUS - HANDLE_INSET),
                radius: HANDLE_RADIUS,
            },
        }
    }
}

fn tick_mark(minutes: u32, max_duration_seconds: u32, metrics: &dyn TextMetrics) -> TickMark {
    let angle = f64::from(minutes) * 60.0 / f64::from(max_duration_seconds) * 360.0;
    let text = minutes.to_string();

    // Push the label outward along the tick direction by half its extent
    let width = metrics.text_width(&text);
    let height = metrics.text_height();
    let rad = (angle - 90.0).to_radians();
    let x_offset = -width / 2.0 + rad.cos() * width / 2.0;
    let y_offset = height / 4.0 + rad.sin() * height / 2.0;

    TickMark {
        minutes,
        angle,
        outer: angle_to_point(angle, DIAL_RADIUS),
        inner: angle_to_point(angle, DIAL_RADIUS - TICK_LENGTH),
        label: Label {
            position: angle_to_point(angle, DIAL_RADIUS - LABEL_INSET).offset(x_offset, y_offset),
            text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace metrics: 6 units per glyph, 12 units tall
    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn text_width(&self, text: &str) -> f64 {
            text.chars().count() as f64 * 6.0
        }

        fn text_height(&self) -> f64 {
            12.0
        }
    }

    fn snapshot(current_angle: f64, remaining_angle: f64, max: u32) -> DialSnapshot {
        DialSnapshot {
            current_angle,
            remaining_angle,
            remaining_seconds: (remaining_angle / 360.0 * f64::from(max)).round() as u32,
            max_duration_seconds: max,
            running: false,
            dragging: false,
        }
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn one_hour_dial_has_twelve_ticks_and_sixty_label() {
        let geometry = DialGeometry::compute(&snapshot(150.0, 150.0, 3600), &FixedMetrics);

        let minutes: Vec<u32> = geometry.ticks.iter().map(|t| t.minutes).collect();
        assert_eq!(minutes, vec![0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55]);
        assert_eq!(geometry.ticks[3].angle, 90.0);

        let sixty = geometry.sixty_label.expect("sixty label");
        assert_eq!(sixty.text, "60");
        assert_point(sixty.position, -12.0, -52.0);
    }

    #[test]
    fn short_dial_skips_sixty_label() {
        let geometry = DialGeometry::compute(&snapshot(0.0, 0.0, 1800), &FixedMetrics);
        assert_eq!(geometry.ticks.len(), 6);
        assert!((geometry.ticks[1].angle - 60.0).abs() < 1e-9);
        assert!(geometry.sixty_label.is_none());
    }

    #[test]
    fn wedge_sweeps_clockwise_from_top() {
        let geometry = DialGeometry::compute(&snapshot(150.0, 120.0, 3600), &FixedMetrics);
        assert_eq!(geometry.remaining.start_angle, 90.0);
        assert_eq!(geometry.remaining.sweep_angle, -120.0);
        assert_eq!(geometry.remaining.bounds, Rect::centered(180.0));
    }

    #[test]
    fn handle_follows_target_not_remaining() {
        let geometry = DialGeometry::compute(&snapshot(90.0, 30.0, 3600), &FixedMetrics);
        assert_point(geometry.handle.center, 85.0, 0.0);
        assert_eq!(geometry.handle.radius, 4.0);
    }

    #[test]
    fn tick_lines_span_ten_units_inward() {
        let geometry = DialGeometry::compute(&snapshot(0.0, 0.0, 3600), &FixedMetrics);
        let top = &geometry.ticks[0];
        assert_point(top.outer, 0.0, -90.0);
        assert_point(top.inner, 0.0, -80.0);
    }

    #[test]
    fn labels_shift_outward_by_half_extent() {
        let geometry = DialGeometry::compute(&snapshot(0.0, 0.0, 3600), &FixedMetrics);

        // "0" at the top: width 6, height 12 -> x -3, y 3 - 6
        assert_point(geometry.ticks[0].label.position, -3.0, -65.0 - 3.0);

        // "15" at 3 o'clock: width 12 -> x -6 + 6, y 3
        assert_point(geometry.ticks[3].label.position, 65.0, 3.0);
    }

    #[test]
    fn geometry_is_idempotent() {
        let snap = snapshot(200.0, 100.0, 3600);
        assert_eq!(
            DialGeometry::compute(&snap, &FixedMetrics),
            DialGeometry::compute(&snap, &FixedMetrics)
        );
    }
}
