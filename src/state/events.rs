//! Notifications emitted by the dial

use serde::{Deserialize, Serialize};

/// Events delivered to dial subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DialEvent {
    /// Remaining time changed through a drag, reset, rescale or tick
    TimeUpdated { remaining_seconds: u32 },
    /// The countdown reached zero on its own
    Finished,
}

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The dial was not running; nothing changed
    Idle,
    /// Still counting, with the seconds left
    Counting(u32),
    /// This tick brought the countdown to zero
    Finished,
}
