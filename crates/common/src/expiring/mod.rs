//! In-memory associative container with per-entry time-to-live
//!
//! [`ExpiringMap`] keeps an ordered primary index from key to entry record
//! and an expiration frontier ordered by deadline. Stale entries are
//! reclaimed lazily: operations that mutate or report size run a purge pass
//! that pops every due deadline off the frontier, and nothing runs in the
//! background.
//!
//! # Features
//!
//! - **Ordered**: `O(log n)` insert, lookup and erase over a `BTreeMap`
//! - **Lazy expiry**: purge cost is bounded by the number of entries that
//!   expired since the last pass, not by the map size
//! - **Generic**: works with any `K: Ord + Clone` and any `V`
//! - **Testable**: clock abstraction for deterministic time-based testing
//! - **Metrics tracking**: optional hit/miss/expiration statistics
//!
//! # Examples
//!
//! ## Per-entry TTL
//! ```
//! use lapse_common::expiring::ExpiringMap;
//!
//! let mut map: ExpiringMap<String, i32> = ExpiringMap::new();
//! map.put("hello".to_string(), 1, 60_000);
//! map.put("world".to_string(), 2, 30_000);
//!
//! assert_eq!(map.get("hello"), 1);
//! assert_eq!(map.keys(), vec!["world".to_string(), "hello".to_string()]);
//! assert_eq!(map.size(), 2);
//! ```
//!
//! ## Default TTL with Builder
//! ```
//! use std::time::Duration;
//!
//! use lapse_common::expiring::{ExpiringMap, ExpiringMapConfig};
//!
//! let config = ExpiringMapConfig::builder()
//!     .default_ttl(Duration::from_secs(300))
//!     .track_metrics(true)
//!     .build()?;
//!
//! let mut map: ExpiringMap<&str, Vec<u8>> = ExpiringMap::with_config(config)?;
//! map.insert("session", vec![1, 2, 3])?;
//!
//! let _ = map.get("session");
//! assert_eq!(map.stats().hits, 1);
//! # Ok::<(), lapse_common::ExpiringMapError>(())
//! ```
//!
//! # Which operations purge
//!
//! | Operation | Purges | Notes |
//! |-----------|--------|-------|
//! | `put`, `put_for`, `insert`, `get_or_insert_with` | yes | after inserting |
//! | `size`, `is_empty`, `purge_expired` | yes | before counting |
//! | `get`, `try_get`, `contains_key`, `keys` | no | expired entries read as absent |
//! | `left` | no | reports `<= 0` for expired, unpurged entries |
//! | `erase`, `remove`, `clear` | no | frontier references go stale |

mod arena;
mod config;
mod core;
mod frontier;
mod stats;

// Re-export public API
pub use self::core::ExpiringMap;

pub use config::{ExpiringMapConfig, ExpiringMapConfigBuilder, MAX_INITIAL_CAPACITY};
pub use stats::ExpiringMapStats;
