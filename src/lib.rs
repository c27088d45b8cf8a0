//! Timer Dial - a circular countdown timer core
//!
//! A radial dial lets the user set a duration by dragging a handle around a
//! circle (snapping to five minutes), then counts down one tick per second,
//! notifying subscribers on every update and once when time runs out.

pub mod config;
pub mod error;
pub mod geometry;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, DialConfiguration};
pub use error::DialError;
pub use geometry::{DialGeometry, Drawable, Point, TextMetrics};
pub use state::{DialEvent, DialSnapshot, TimerDial};
pub use tasks::CountdownEngine;
pub use utils::{format_remaining, shutdown_signal};
