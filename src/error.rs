//! Error types for the dial core

use thiserror::Error;

/// Errors raised by dial construction and the countdown engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialError {
    /// A zero maximum duration would make the angle/time mapping undefined
    #[error("maximum duration must be a positive number of seconds, got {0}")]
    InvalidMaxDuration(u32),

    #[error("tick interval must be a positive number of milliseconds, got {0}")]
    InvalidTickInterval(u64),

    /// The countdown driver needs a tokio runtime to schedule ticks
    #[error("no tokio runtime to drive the countdown: {0}")]
    NoRuntime(String),

    /// The shared dial state was poisoned by a panicking holder
    #[error("failed to lock dial state: {0}")]
    LockPoisoned(String),
}
