//! Simulated latency configuration.
//!
//! Signing in, registering and paying wait a short while before taking
//! effect, so the pending states of the forms are visible. The delays are
//! configurable and may be set to zero.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default delay before sign-in and registration take effect.
pub const DEFAULT_LOGIN_MS: u64 = 600;

/// Default delay before a payment is confirmed.
pub const DEFAULT_PAYMENT_MS: u64 = 2000;

/// Maximum allowed delay (10 seconds).
pub const MAX_DELAY_MS: u64 = 10_000;

/// Delays applied to simulated server round trips.
///
/// # Examples
///
/// ```
/// use beiramar_config::DelayConfig;
///
/// let delays = DelayConfig::default();
/// assert_eq!(delays.login().as_millis(), 600);
/// assert_eq!(delays.payment().as_millis(), 2000);
/// assert!(DelayConfig::none().validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayConfig {
    /// Sign-in and registration delay in milliseconds.
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,

    /// Payment delay in milliseconds.
    #[serde(default = "default_payment_ms")]
    pub payment_ms: u64,
}

fn default_login_ms() -> u64 {
    DEFAULT_LOGIN_MS
}

fn default_payment_ms() -> u64 {
    DEFAULT_PAYMENT_MS
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            login_ms: DEFAULT_LOGIN_MS,
            payment_ms: DEFAULT_PAYMENT_MS,
        }
    }
}

impl DelayConfig {
    /// Delays of zero, for tests and scripted runs.
    #[must_use]
    pub fn none() -> Self {
        Self {
            login_ms: 0,
            payment_ms: 0,
        }
    }

    /// The sign-in delay.
    #[must_use]
    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    /// The payment delay.
    #[must_use]
    pub fn payment(&self) -> Duration {
        Duration::from_millis(self.payment_ms)
    }

    /// Validates both delays.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelay`] if a delay exceeds [`MAX_DELAY_MS`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("login_ms", self.login_ms), ("payment_ms", self.payment_ms)] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::InvalidDelay {
                    reason: format!("{name} {value} exceeds maximum of {MAX_DELAY_MS} ms"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_at_boundary() {
        let delays = DelayConfig {
            login_ms: MAX_DELAY_MS,
            payment_ms: 0,
        };
        assert!(delays.validate().is_ok());
    }

    #[test]
    fn validate_above_maximum() {
        let delays = DelayConfig {
            login_ms: 0,
            payment_ms: MAX_DELAY_MS + 1,
        };
        let err = delays.validate().unwrap_err();
        assert!(err.to_string().contains("payment_ms"));
    }

    #[test]
    fn deserialize_partial() {
        let delays: DelayConfig = serde_json::from_str(r#"{"login_ms": 50}"#).unwrap();
        assert_eq!(delays.login_ms, 50);
        assert_eq!(delays.payment_ms, DEFAULT_PAYMENT_MS);
    }

    #[test]
    fn deserialize_with_defaults() {
        let delays: DelayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(delays, DelayConfig::default());
    }
}
