//! Background tasks module
//!
//! This module contains the periodic countdown driver that runs alongside the
//! host's input loop.

pub mod countdown;

// Re-export main types
pub use countdown::{countdown_tick_task, CountdownEngine, TickHandle};
