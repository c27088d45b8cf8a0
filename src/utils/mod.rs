//! Utility functions module
//!
//! This module contains utility functions used by the terminal host.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::format_remaining;
pub use signals::shutdown_signal;
