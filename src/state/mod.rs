//! State management module
//!
//! The dial's state record, its published snapshot, emitted events and the
//! `TimerDial` that owns and mutates them.

pub mod dial_state;
pub mod events;
pub mod timer_dial;

// Re-export main types
pub use dial_state::{DialSnapshot, DialState};
pub use events::{DialEvent, TickOutcome};
pub use timer_dial::TimerDial;
