//! Expiring map configuration types and builder
//!
//! Per-entry TTLs are always passed to `put`; the configuration only covers
//! the optional default TTL used by `insert`, metrics collection and initial
//! sizing.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Largest accepted `initial_capacity`
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Configuration for expiring map behavior
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpiringMapConfig {
    /// Time-to-live applied by `insert` (None = `insert` is rejected)
    pub default_ttl: Option<Duration>,

    /// Whether to collect hit/miss/expiration counters
    pub track_metrics: bool,

    /// Number of records to pre-allocate storage for
    pub initial_capacity: usize,
}

impl ExpiringMapConfig {
    /// Create a new configuration builder
    pub fn builder() -> ExpiringMapConfigBuilder {
        ExpiringMapConfigBuilder::default()
    }

    /// Quick preset with a default TTL for `insert`
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    ///
    /// use lapse_common::expiring::ExpiringMapConfig;
    ///
    /// let config = ExpiringMapConfig::ttl(Duration::from_secs(30));
    /// assert_eq!(config.default_ttl, Some(Duration::from_secs(30)));
    /// ```
    pub fn ttl(duration: Duration) -> Self {
        Self { default_ttl: Some(duration), ..Self::default() }
    }

    /// Quick preset with metrics collection enabled
    pub fn tracked() -> Self {
        Self { track_metrics: true, ..Self::default() }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(ttl) = self.default_ttl {
            if ttl.is_zero() {
                return Err(ConfigError::invalid("default_ttl must be greater than 0"));
            }
            if i64::try_from(ttl.as_millis()).is_err() {
                return Err(ConfigError::invalid(format!(
                    "default_ttl of {ttl:?} does not fit in i64 milliseconds"
                )));
            }
        }

        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::invalid(format!(
                "initial_capacity must be at most {MAX_INITIAL_CAPACITY}, got {}",
                self.initial_capacity
            )));
        }

        Ok(())
    }

    /// Default TTL in milliseconds, if one is configured
    pub(crate) fn default_ttl_millis(&self) -> Option<i64> {
        self.default_ttl.map(|ttl| i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Builder for ExpiringMapConfig with fluent API
#[derive(Debug, Default)]
pub struct ExpiringMapConfigBuilder {
    config: ExpiringMapConfig,
}

impl ExpiringMapConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL used by `insert`
    pub fn default_ttl(mut self, duration: Duration) -> Self {
        self.config.default_ttl = Some(duration);
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Pre-allocate storage for `capacity` records
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> ConfigResult<ExpiringMapConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for expiring::config.
    use super::*;

    /// Validates `ExpiringMapConfig::default` behavior for the config default
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `config.default_ttl.is_none()` evaluates to true.
    /// - Ensures `!config.track_metrics` evaluates to true.
    /// - Confirms `config.initial_capacity` equals `0`.
    /// - Ensures `config.validate().is_ok()` evaluates to true.
    #[test]
    fn test_config_default() {
        let config = ExpiringMapConfig::default();
        assert!(config.default_ttl.is_none());
        assert!(!config.track_metrics);
        assert_eq!(config.initial_capacity, 0);
        assert!(config.validate().is_ok());
    }

    /// Validates `ExpiringMapConfig::ttl` behavior for the ttl preset
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `config.default_ttl` equals `Some(ttl)`.
    /// - Confirms `config.default_ttl_millis()` equals `Some(1_500)`.
    #[test]
    fn test_config_ttl_preset() {
        let ttl = Duration::from_millis(1_500);
        let config = ExpiringMapConfig::ttl(ttl);

        assert_eq!(config.default_ttl, Some(ttl));
        assert_eq!(config.default_ttl_millis(), Some(1_500));
        assert!(!config.track_metrics);
    }

    /// Validates `ExpiringMapConfig::builder` behavior for the builder
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms every builder field is carried into the config.
    #[test]
    fn test_config_builder() -> anyhow::Result<()> {
        let config = ExpiringMapConfig::builder()
            .default_ttl(Duration::from_secs(60))
            .track_metrics(true)
            .initial_capacity(128)
            .build()?;

        assert_eq!(config.default_ttl, Some(Duration::from_secs(60)));
        assert!(config.track_metrics);
        assert_eq!(config.initial_capacity, 128);
        Ok(())
    }

    /// Validates `ExpiringMapConfigBuilder::build` rejects a zero TTL.
    ///
    /// Assertions:
    /// - Ensures the error message mentions `default_ttl`.
    #[test]
    fn test_config_rejects_zero_ttl() {
        let err = ExpiringMapConfig::builder().default_ttl(Duration::ZERO).build().unwrap_err();
        assert!(err.to_string().contains("default_ttl"));
    }

    /// Validates `ExpiringMapConfigBuilder::build` rejects a TTL that does
    /// not fit the millisecond deadline arithmetic.
    #[test]
    fn test_config_rejects_unrepresentable_ttl() {
        let result = ExpiringMapConfig::builder().default_ttl(Duration::MAX).build();
        assert!(result.is_err());
    }

    /// Validates `ExpiringMapConfigBuilder::build` rejects oversized
    /// capacities.
    ///
    /// Assertions:
    /// - Ensures `initial_capacity(MAX_INITIAL_CAPACITY)` is accepted.
    /// - Ensures `initial_capacity(MAX_INITIAL_CAPACITY + 1)` is rejected.
    #[test]
    fn test_config_capacity_limit() {
        assert!(ExpiringMapConfig::builder().initial_capacity(MAX_INITIAL_CAPACITY).build().is_ok());
        assert!(ExpiringMapConfig::builder()
            .initial_capacity(MAX_INITIAL_CAPACITY + 1)
            .build()
            .is_err());
    }
}
