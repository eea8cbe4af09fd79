//! Ordered in-memory containers whose entries expire.
//!
//! # Modules
//!
//! - [`expiring`]: the [`ExpiringMap`] container, its configuration and
//!   statistics
//! - [`clock`]: injectable time source ([`SystemClock`], [`MockClock`])
//! - [`error`]: configuration and insert errors

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod clock;
pub mod error;
pub mod expiring;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use clock::{Clock, MockClock, SystemClock};
pub use error::{ConfigError, ConfigResult, ExpiringMapError, ExpiringMapResult};
pub use expiring::{ExpiringMap, ExpiringMapConfig, ExpiringMapStats};
