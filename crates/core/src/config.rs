//! Pipeline runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the pipeline. The
//! library never reads environment variables itself; binaries read them and hand the raw
//! values to the `*_from_env_value` parsers below.

use crate::constants::{
    DEFAULT_BACKOFF_MS, DEFAULT_INTER_ITEM_DELAY_MS, DEFAULT_MAX_ATTEMPTS, MAX_ATTEMPTS_LIMIT,
};
use crate::{PipelineError, PipelineResult};
use std::time::Duration;

/// Retry and pacing settings for the generation pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    max_attempts: u32,
    backoff_base: Duration,
    inter_item_delay: Duration,
}

impl PipelineConfig {
    /// Create a new `PipelineConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidInput` if `max_attempts` is zero or above
    /// [`MAX_ATTEMPTS_LIMIT`].
    pub fn new(
        max_attempts: u32,
        backoff_base: Duration,
        inter_item_delay: Duration,
    ) -> PipelineResult<Self> {
        if max_attempts == 0 {
            return Err(PipelineError::InvalidInput(
                "max_attempts must be at least 1".into(),
            ));
        }
        if max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(PipelineError::InvalidInput(format!(
                "max_attempts cannot exceed {}",
                MAX_ATTEMPTS_LIMIT
            )));
        }

        Ok(Self {
            max_attempts,
            backoff_base,
            inter_item_delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub fn inter_item_delay(&self) -> Duration {
        self.inter_item_delay
    }

    /// Delay to wait after the given (1-based) failed attempt.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }

    /// Same settings with a different attempt limit.
    pub fn with_max_attempts(self, max_attempts: u32) -> PipelineResult<Self> {
        Self::new(max_attempts, self.backoff_base, self.inter_item_delay)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_MS),
            inter_item_delay: Duration::from_millis(DEFAULT_INTER_ITEM_DELAY_MS),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the attempt count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_ATTEMPTS`].
pub fn max_attempts_from_env_value(value: Option<String>) -> PipelineResult<u32> {
    match non_empty(value) {
        None => Ok(DEFAULT_MAX_ATTEMPTS),
        Some(v) => v.parse::<u32>().map_err(|e| {
            PipelineError::InvalidInput(format!("invalid max attempts '{v}': {e}"))
        }),
    }
}

/// Parse a millisecond duration from an optional string value, falling back to `default_ms`.
pub fn millis_from_env_value(value: Option<String>, default_ms: u64) -> PipelineResult<Duration> {
    match non_empty(value) {
        None => Ok(Duration::from_millis(default_ms)),
        Some(v) => v
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| PipelineError::InvalidInput(format!("invalid milliseconds '{v}': {e}"))),
    }
}

/// Build a config from raw environment values (`None` meaning unset).
pub fn config_from_env_values(
    max_attempts: Option<String>,
    backoff_ms: Option<String>,
    inter_item_delay_ms: Option<String>,
) -> PipelineResult<PipelineConfig> {
    PipelineConfig::new(
        max_attempts_from_env_value(max_attempts)?,
        millis_from_env_value(backoff_ms, DEFAULT_BACKOFF_MS)?,
        millis_from_env_value(inter_item_delay_ms, DEFAULT_INTER_ITEM_DELAY_MS)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.backoff_base(), Duration::from_millis(1_000));
        assert_eq!(config.backoff_after(2), Duration::from_millis(2_000));
    }

    #[test]
    fn rejects_zero_attempts() {
        let err = PipelineConfig::new(0, Duration::ZERO, Duration::ZERO)
            .expect_err("should reject zero");
        assert!(matches!(err, PipelineError::InvalidInput(msg) if msg.contains("at least 1")));
    }

    #[test]
    fn rejects_attempts_above_limit() {
        let err = PipelineConfig::new(11, Duration::ZERO, Duration::ZERO)
            .expect_err("should reject");
        assert!(matches!(err, PipelineError::InvalidInput(msg) if msg.contains("cannot exceed")));
    }

    #[test]
    fn env_values_default_when_unset_or_blank() {
        let config = config_from_env_values(None, Some("  ".into()), None).expect("defaults");
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn env_values_are_parsed() {
        let config = config_from_env_values(Some("5".into()), Some("10".into()), Some("0".into()))
            .expect("parse");
        assert_eq!(config.max_attempts(), 5);
        assert_eq!(config.backoff_base(), Duration::from_millis(10));
        assert_eq!(config.inter_item_delay(), Duration::ZERO);
    }

    #[test]
    fn env_values_reject_garbage() {
        let err = max_attempts_from_env_value(Some("three".into())).expect_err("garbage");
        assert!(matches!(err, PipelineError::InvalidInput(msg) if msg.contains("three")));
    }
}
