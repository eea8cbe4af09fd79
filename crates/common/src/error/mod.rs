//! Error types for expiring containers
//!
//! None of the container's core operations fail: absent and expired keys
//! resolve to default values instead. Errors exist for configuration
//! validation and for [`ExpiringMap::insert`], which depends on a configured
//! default time-to-live.
//!
//! [`ExpiringMap::insert`]: crate::expiring::ExpiringMap::insert

use thiserror::Error;

/// Simple configuration error for validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Human-readable description of the rejected value
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid { message: message.into() }
    }
}

/// Errors returned by fallible [`ExpiringMap`](crate::expiring::ExpiringMap)
/// operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiringMapError {
    /// `insert` was called on a map configured without a default TTL
    #[error("No default TTL configured; use put() with an explicit TTL")]
    MissingDefaultTtl,

    /// The supplied configuration failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration result type using simple config errors
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for fallible container operations
pub type ExpiringMapResult<T> = Result<T, ExpiringMapError>;
