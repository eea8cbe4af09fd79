//! Core expiring map implementation
//!
//! Records live in a generational [`Arena`]. The primary index maps each key
//! to the slot of its current record, and the [`Frontier`] holds one
//! `(deadline, slot)` reference per `put`. Overwrites and erases touch only
//! the index and the arena; the frontier catches up during the next purge
//! pass, which discards references whose slot no longer resolves.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use super::arena::{Arena, SlotId};
use super::config::ExpiringMapConfig;
use super::frontier::Frontier;
use super::stats::{ExpiringMapStats, MetricsCollector};
use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigResult, ExpiringMapError, ExpiringMapResult};

/// Entry record shared by the index (owning slot) and the frontier (handle)
#[derive(Debug)]
struct Record<K, V> {
    key: K,
    value: V,
    deadline: i64,
}

/// Ordered map whose entries expire after a per-entry time-to-live
///
/// Expired entries are reclaimed lazily: [`put`](Self::put),
/// [`size`](Self::size), [`is_empty`](Self::is_empty) and
/// [`purge_expired`](Self::purge_expired) run a purge pass that pops due
/// deadlines off the frontier. Read paths (`get`, `try_get`, `contains_key`,
/// `left`, `keys`) never mutate and simply treat an expired record as absent.
///
/// The map is single-threaded. Callers sharing it across threads must wrap it
/// in a lock, and must take a write lock for `put` and `size` because both
/// purge.
///
/// # Type Parameters
/// - `K`: Key type (must be `Ord + Clone`)
/// - `V`: Value type
/// - `C`: Clock type for deadlines (defaults to `SystemClock`)
///
/// # Example
/// ```
/// use lapse_common::clock::MockClock;
/// use lapse_common::expiring::{ExpiringMap, ExpiringMapConfig};
///
/// let clock = MockClock::new();
/// let mut map: ExpiringMap<String, i32, MockClock> =
///     ExpiringMap::with_clock(ExpiringMapConfig::default(), clock.clone()).unwrap();
///
/// map.put("hello".to_string(), 1, 500);
/// assert_eq!(map.get("hello"), 1);
/// assert_eq!(map.left("hello"), 500);
///
/// clock.advance_millis(500);
/// assert_eq!(map.get("hello"), 0);
/// assert_eq!(map.size(), 0);
/// ```
pub struct ExpiringMap<K, V, C = SystemClock>
where
    K: Ord + Clone,
    C: Clock,
{
    index: BTreeMap<K, SlotId>,
    records: Arena<Record<K, V>>,
    frontier: Frontier,
    config: ExpiringMapConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> ExpiringMap<K, V, SystemClock>
where
    K: Ord + Clone,
{
    /// Create an empty map with the default configuration and system clock
    pub fn new() -> Self {
        Self::from_parts(ExpiringMapConfig::default(), SystemClock)
    }

    /// Create an empty map with the given configuration and system clock
    pub fn with_config(config: ExpiringMapConfig) -> ConfigResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V> Default for ExpiringMap<K, V, SystemClock>
where
    K: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> ExpiringMap<K, V, C>
where
    K: Ord + Clone,
    C: Clock,
{
    /// Create an empty map with a custom clock (useful for testing)
    pub fn with_clock(config: ExpiringMapConfig, clock: C) -> ConfigResult<Self> {
        config.validate()?;
        debug!(
            default_ttl_ms = config.default_ttl_millis(),
            track_metrics = config.track_metrics,
            initial_capacity = config.initial_capacity,
            "expiring map created"
        );
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: ExpiringMapConfig, clock: C) -> Self {
        Self {
            index: BTreeMap::new(),
            records: Arena::with_capacity(config.initial_capacity),
            frontier: Frontier::with_capacity(config.initial_capacity),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Insert or overwrite `key`, expiring `ttl_ms` milliseconds from now
    ///
    /// A non-positive `ttl_ms` stores an already-expired record, which the
    /// purge pass at the end of this call removes again. The purge may also
    /// remove unrelated entries whose deadline has passed.
    pub fn put(&mut self, key: K, value: V, ttl_ms: i64) {
        let deadline = self.clock.millis_since_epoch().saturating_add(ttl_ms);
        let slot = self.records.insert(Record { key: key.clone(), value, deadline });

        // The superseded record is dropped now; its frontier reference goes
        // stale and is discarded when it reaches the top.
        if let Some(previous) = self.index.insert(key, slot) {
            self.records.remove(previous);
        }
        self.frontier.push(deadline, slot);

        if self.config.track_metrics {
            self.metrics.record_insert();
        }

        self.purge();
    }

    /// [`put`](Self::put) taking the TTL as a `Duration`
    pub fn put_for(&mut self, key: K, value: V, ttl: Duration) {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self.put(key, value, ttl_ms);
    }

    /// [`put`](Self::put) using the configured default TTL
    ///
    /// # Errors
    /// Returns [`ExpiringMapError::MissingDefaultTtl`] when the map was
    /// configured without `default_ttl`.
    pub fn insert(&mut self, key: K, value: V) -> ExpiringMapResult<()> {
        let ttl_ms = self.config.default_ttl_millis().ok_or(ExpiringMapError::MissingDefaultTtl)?;
        self.put(key, value, ttl_ms);
        Ok(())
    }

    /// Value for `key`, or `V::default()` if it is absent or expired
    ///
    /// An absent key and a key holding the default value look the same here;
    /// use [`try_get`](Self::try_get) to tell them apart.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Default + Clone,
    {
        self.try_get(key).cloned().unwrap_or_default()
    }

    /// Borrow the value for `key` if it is present and not yet expired
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let now = self.clock.millis_since_epoch();
        let value = self.record(key).filter(|record| record.deadline > now).map(|r| &r.value);

        if self.config.track_metrics {
            if value.is_some() {
                self.metrics.record_hit();
            } else {
                self.metrics.record_miss();
            }
        }

        value
    }

    /// Whether `key` is present and not yet expired
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let now = self.clock.millis_since_epoch();
        self.record(key).is_some_and(|record| record.deadline > now)
    }

    /// Milliseconds until `key` expires
    ///
    /// Returns `0` when the key is absent. For a key that has expired but has
    /// not been purged yet this reports the raw remaining time, which is zero
    /// or negative, so callers can see entries awaiting reclamation.
    pub fn left<Q>(&self, key: &Q) -> i64
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let now = self.clock.millis_since_epoch();
        self.record(key).map_or(0, |record| record.deadline.saturating_sub(now))
    }

    /// Live keys ordered by ascending deadline, ties by ascending key
    pub fn keys(&self) -> Vec<K> {
        let now = self.clock.millis_since_epoch();

        let mut live: Vec<(i64, &K)> = self
            .index
            .iter()
            .filter_map(|(key, slot)| {
                let record = self.records.get(*slot)?;
                (record.deadline > now).then_some((record.deadline, key))
            })
            .collect();

        // Index iteration is already in key order and the sort is stable.
        live.sort_by_key(|(deadline, _)| *deadline);
        live.into_iter().map(|(_, key)| key.clone()).collect()
    }

    /// Remove `key` if present; no effect otherwise
    pub fn erase<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let _ = self.remove(key);
    }

    /// Remove `key`, returning its value if it had not expired
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let now = self.clock.millis_since_epoch();
        let slot = self.index.remove(key)?;
        let record = self.records.remove(slot)?;
        (record.deadline > now).then_some(record.value)
    }

    /// Return the live value for `key`, or put `f()` with `ttl_ms`
    pub fn get_or_insert_with<F>(&mut self, key: K, ttl_ms: i64, f: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(value) = self.try_get(&key) {
            return value.clone();
        }

        let value = f();
        self.put(key, value.clone(), ttl_ms);
        value
    }

    /// Remove every entry and every pending deadline
    ///
    /// Also resets collected metrics.
    pub fn clear(&mut self) {
        let dropped = self.index.len();
        self.index.clear();
        self.records.clear();
        self.frontier.clear();

        if self.config.track_metrics {
            self.metrics.reset();
        }

        debug!(dropped, "expiring map cleared");
    }

    /// Number of live entries
    ///
    /// Runs a purge pass first so the count never includes expired records.
    pub fn size(&mut self) -> usize {
        self.purge();
        self.index.len()
    }

    /// Whether the map holds no live entries (purges, like `size`)
    pub fn is_empty(&mut self) -> bool {
        self.size() == 0
    }

    /// Run a purge pass now
    ///
    /// Returns the number of expired records removed from the index.
    pub fn purge_expired(&mut self) -> usize {
        self.purge()
    }

    /// Get map statistics
    ///
    /// Counters stay at zero unless `track_metrics` is enabled.
    pub fn stats(&self) -> ExpiringMapStats {
        self.metrics.snapshot(self.index.len(), self.frontier.len())
    }

    /// Configuration the map was built with
    pub fn config(&self) -> &ExpiringMapConfig {
        &self.config
    }

    fn record<Q>(&self, key: &Q) -> Option<&Record<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).and_then(|slot| self.records.get(*slot))
    }

    /// Pop due deadlines until the earliest remaining one is in the future
    fn purge(&mut self) -> usize {
        let now = self.clock.millis_since_epoch();
        let mut expired = 0usize;
        let mut stale = 0usize;

        while let Some(pending) = self.frontier.peek() {
            let Some(record) = self.records.get(pending.slot) else {
                // Record was overwritten, erased or cleared.
                self.frontier.pop();
                stale += 1;
                continue;
            };

            if record.deadline > now {
                break;
            }

            self.frontier.pop();
            if self.index.get(&record.key) == Some(&pending.slot) {
                self.index.remove(&record.key);
                expired += 1;
            } else {
                stale += 1;
            }
            self.records.remove(pending.slot);
        }

        if expired > 0 || stale > 0 {
            trace!(expired, stale, remaining = self.index.len(), "purge pass completed");

            if self.config.track_metrics {
                self.metrics.record_expirations(expired as u64);
                self.metrics.record_stale_discards(stale as u64);
            }
        }

        expired
    }
}

impl<K, V, C> fmt::Debug for ExpiringMap<K, V, C>
where
    K: Ord + Clone,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringMap")
            .field("config", &self.config)
            .field("indexed", &self.index.len())
            .field("records", &self.records.len())
            .field("pending", &self.frontier.len())
            .finish()
    }
}
