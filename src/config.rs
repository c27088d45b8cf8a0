//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::error::DialError;

/// Default full-dial span: one hour
pub const DEFAULT_MAX_DURATION_SECONDS: u32 = 3600;
/// Default countdown tick period
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Immutable per-dial parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialConfiguration {
    max_duration_seconds: u32,
    tick_interval: Duration,
}

impl DialConfiguration {
    /// Build a validated configuration; both values must be positive
    pub fn new(max_duration_seconds: u32, tick_interval_ms: u64) -> Result<Self, DialError> {
        if max_duration_seconds == 0 {
            return Err(DialError::InvalidMaxDuration(max_duration_seconds));
        }
        if tick_interval_ms == 0 {
            return Err(DialError::InvalidTickInterval(tick_interval_ms));
        }

        Ok(Self {
            max_duration_seconds,
            tick_interval: Duration::from_millis(tick_interval_ms),
        })
    }

    pub fn max_duration_seconds(&self) -> u32 {
        self.max_duration_seconds
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Copy of this configuration with a different maximum duration
    pub fn with_max_duration(self, max_duration_seconds: u32) -> Result<Self, DialError> {
        Self::new(max_duration_seconds, self.tick_interval.as_millis() as u64)
    }
}

impl Default for DialConfiguration {
    fn default() -> Self {
        Self {
            max_duration_seconds: DEFAULT_MAX_DURATION_SECONDS,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timer-dial")]
#[command(about = "A circular countdown timer driven from the terminal")]
#[command(version)]
pub struct Config {
    /// Seconds represented by a full turn of the dial
    #[arg(long, default_value_t = DEFAULT_MAX_DURATION_SECONDS)]
    pub max_duration: u32,

    /// Countdown tick period in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_interval: u64,

    /// Initial duration in minutes, set by dragging the handle (snaps to 5 minutes)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Print events as JSON lines instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Validated dial parameters
    pub fn dial_configuration(&self) -> Result<DialConfiguration, DialError> {
        DialConfiguration::new(self.max_duration, self.tick_interval)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_one_hour_one_second_ticks() {
        let config = DialConfiguration::default();
        assert_eq!(config.max_duration_seconds(), 3600);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_zero_values() {
        assert_eq!(
            DialConfiguration::new(0, 1000),
            Err(DialError::InvalidMaxDuration(0))
        );
        assert_eq!(
            DialConfiguration::new(3600, 0),
            Err(DialError::InvalidTickInterval(0))
        );
    }

    #[test]
    fn with_max_duration_keeps_tick_interval() {
        let config = DialConfiguration::new(3600, 250).unwrap();
        let changed = config.with_max_duration(1800).unwrap();
        assert_eq!(changed.max_duration_seconds(), 1800);
        assert_eq!(changed.tick_interval(), Duration::from_millis(250));
        assert!(config.with_max_duration(0).is_err());
    }

    #[test]
    fn cli_arguments_map_to_dial_configuration() {
        let config = Config::try_parse_from([
            "timer-dial",
            "--max-duration",
            "1800",
            "--tick-interval",
            "500",
            "-m",
            "10",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.minutes, Some(10));
        assert_eq!(config.log_level(), "debug");
        let dial = config.dial_configuration().unwrap();
        assert_eq!(dial.max_duration_seconds(), 1800);
        assert_eq!(dial.tick_interval(), Duration::from_millis(500));
    }
}
