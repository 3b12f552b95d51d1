//! Loadable retry settings.
//!
//! Interval and retry budget can be kept out of code: in a TOML document, a
//! file, or environment variables. Settings are applied to an executor with
//! [`Tryable::with_settings`](crate::Tryable::with_settings).
//!
//! Values are not validated beyond their integer shape. Negative numbers
//! clamp to zero, which means "no wait" for the interval and "run once" for
//! the retry budget.

use crate::error::{Error, Result};
use crate::retry::{DEFAULT_INTERVAL, DEFAULT_RETRIES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the interval in milliseconds.
pub const ENV_INTERVAL_MS: &str = "TRYABLE_INTERVAL_MS";

/// Environment variable holding the retry budget.
pub const ENV_RETRIES: &str = "TRYABLE_RETRIES";

/// Interval and retry budget for an executor.
///
/// Serialized as `interval_ms` and `retries`; both keys are optional.
///
/// # Examples
///
/// ```rust
/// use tryable::RetrySettings;
/// use std::time::Duration;
///
/// let settings = RetrySettings::from_toml_str("interval_ms = 250\nretries = 4")?;
/// assert_eq!(settings.interval(), Duration::from_millis(250));
/// assert_eq!(settings.retries(), 4);
/// # Ok::<(), tryable::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings", into = "RawSettings")]
pub struct RetrySettings {
    interval: Duration,
    retries: u32,
}

impl Default for RetrySettings {
    /// Defaults:
    /// - `interval`: 500ms
    /// - `retries`: 20
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl RetrySettings {
    /// Set the interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the retry budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The configured retry budget.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Parse settings from a TOML document.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Read and parse a TOML settings file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }

    /// Load settings from environment variables.
    ///
    /// This will look for:
    /// - `TRYABLE_INTERVAL_MS` for the interval in milliseconds
    /// - `TRYABLE_RETRIES` for the retry budget
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();

        if let Some(millis) = read_env_int(ENV_INTERVAL_MS)? {
            settings.interval = interval_from_millis(millis);
        }

        if let Some(retries) = read_env_int(ENV_RETRIES)? {
            settings.retries = retries_from_count(retries)?;
        }

        Ok(settings)
    }

    /// Merge this configuration with another, with the other taking precedence
    /// wherever it differs from the defaults.
    pub fn merge(mut self, other: RetrySettings) -> Self {
        if other.interval != DEFAULT_INTERVAL {
            self.interval = other.interval;
        }
        if other.retries != DEFAULT_RETRIES {
            self.retries = other.retries;
        }
        self
    }
}

/// Wire shape of [`RetrySettings`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    #[serde(default = "default_interval_ms")]
    interval_ms: i64,
    #[serde(default = "default_retries")]
    retries: i64,
}

fn default_interval_ms() -> i64 {
    DEFAULT_INTERVAL.as_millis() as i64
}

fn default_retries() -> i64 {
    i64::from(DEFAULT_RETRIES)
}

impl TryFrom<RawSettings> for RetrySettings {
    type Error = Error;

    fn try_from(raw: RawSettings) -> Result<Self> {
        Ok(Self {
            interval: interval_from_millis(raw.interval_ms),
            retries: retries_from_count(raw.retries)?,
        })
    }
}

impl From<RetrySettings> for RawSettings {
    fn from(settings: RetrySettings) -> Self {
        Self {
            interval_ms: i64::try_from(settings.interval.as_millis()).unwrap_or(i64::MAX),
            retries: i64::from(settings.retries),
        }
    }
}

fn interval_from_millis(millis: i64) -> Duration {
    Duration::from_millis(millis.max(0).unsigned_abs())
}

fn retries_from_count(count: i64) -> Result<u32> {
    u32::try_from(count.max(0))
        .map_err(|_| Error::config(format!("retries must fit in 32 bits, got {count}")))
}

fn read_env_int(var: &'static str) -> Result<Option<i64>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}
