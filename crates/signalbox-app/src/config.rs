//! Console configuration.

use std::time::Duration;

use signalbox_core::{DEFAULT_ALERT_CAPACITY, DEFAULT_REQUEST_TIMEOUT};
use thiserror::Error;

/// Default interval between operational refreshes.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(5);

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Tick period must be positive.
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,

    /// Request timeout must be positive.
    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    /// Alert feed must hold at least one alert.
    #[error("alert capacity must be at least 1")]
    ZeroAlertCapacity,
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Interval between operational refreshes while signed in
    pub tick_period: Duration,
    /// Bound on each credential store round trip
    pub request_timeout: Duration,
    /// Maximum alerts retained in the feed
    pub alert_capacity: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            alert_capacity: DEFAULT_ALERT_CAPACITY,
        }
    }
}

impl ConsoleConfig {
    /// Check every value, returning the config unchanged if valid.
    ///
    /// # Errors
    ///
    /// The first zero-valued field, as a [`ConfigError`].
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        if self.alert_capacity == 0 {
            return Err(ConfigError::ZeroAlertCapacity);
        }
        Ok(self)
    }
}
