//! Dial state record and its published snapshot

use serde::{Deserialize, Serialize};

/// Angle of the 25-minute default position on a one-hour dial
pub const DEFAULT_ANGLE: f64 = 150.0;

/// Mutable dial state, owned exclusively by the dial
#[derive(Debug, Clone, PartialEq)]
pub struct DialState {
    /// Target angle set by the user (handle position)
    pub current_angle: f64,
    /// Angle of the time left; equals `current_angle` when idle or reset
    pub remaining_angle: f64,
    pub remaining_seconds: u32,
    pub running: bool,
    pub dragging: bool,
    /// Milliseconds since epoch of the last start or tick
    pub last_tick_ms: i64,
}

impl DialState {
    /// Fresh state at the default position; seconds are filled by the first time update
    pub fn new() -> Self {
        Self {
            current_angle: DEFAULT_ANGLE,
            remaining_angle: DEFAULT_ANGLE,
            remaining_seconds: 0,
            running: false,
            dragging: false,
            last_tick_ms: 0,
        }
    }

    pub fn snapshot(&self, max_duration_seconds: u32) -> DialSnapshot {
        DialSnapshot {
            current_angle: self.current_angle,
            remaining_angle: self.remaining_angle,
            remaining_seconds: self.remaining_seconds,
            max_duration_seconds,
            running: self.running,
            dragging: self.dragging,
        }
    }
}

impl Default for DialState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of the dial state, published after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialSnapshot {
    pub current_angle: f64,
    pub remaining_angle: f64,
    pub remaining_seconds: u32,
    pub max_duration_seconds: u32,
    pub running: bool,
    pub dragging: bool,
}

impl DialSnapshot {
    /// Whole minutes covered by a full turn
    pub fn max_minutes(&self) -> u32 {
        self.max_duration_seconds / 60
    }
}
