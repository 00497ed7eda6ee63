//! # LFU Cache with TTL Expiry
//!
//! [`TtlLfuCache`] wraps [`LfuCache`] with a per-cache time-to-live, using
//! the same lazy-expiry model as [`TtlLruCache`](crate::policy::lru_ttl):
//! deadlines are checked at the moment of each read, with an optional eager
//! sweep.
//!
//! ## Expiry precedes frequency
//!
//! The expiry check runs before any frequency accounting. A `get` on an
//! expired key evicts it and reports a miss without bumping anything, so a
//! dead entry can never climb the frequency ladder on its way out:
//!
//! ```text
//!   get(k)
//!     1. deadline passed?  → remove via the LFU core (map, bucket,
//!        min_freq all updated together), return None
//!     2. otherwise bump frequency, restamp deadline, return the value
//! ```
//!
//! All removal paths (lazy expiry, explicit `remove`, capacity eviction,
//! the sweep) funnel through the LFU core's own removal, which keeps its
//! bookkeeping consistent.
//!
//! Every clock-reading operation has an `_at(now: Instant)` twin; the public
//! names call them with `Instant::now()`.

use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::ds::TtlValue;
use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;

/// Frequency-ordered cache whose entries expire a fixed TTL after their last
/// write or successful read.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use linkcache::policy::lfu_ttl::TtlLfuCache;
///
/// let mut cache = TtlLfuCache::try_new(16, Duration::from_secs(60)).unwrap();
/// cache.insert("hot", 1);
/// assert_eq!(cache.get(&"hot"), Some(&1));
/// ```
pub struct TtlLfuCache<K, V> {
    inner: LfuCache<K, TtlValue<V>>,
    ttl: Duration,
}

impl<K, V> TtlLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries, each living for
    /// `ttl` after its last write or successful read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero or `ttl` is zero.
    pub fn try_new(capacity: usize, ttl: Duration) -> Result<Self, ConfigError> {
        if ttl.is_zero() {
            return Err(ConfigError::new("ttl must be greater than 0"));
        }
        Ok(Self {
            inner: LfuCache::try_new(capacity)?,
            ttl,
        })
    }

    /// Evicts `key` if its entry has expired as of `now`.
    ///
    /// Uses `peek` so the check itself never touches the frequency ladder.
    fn expire_if_needed(&mut self, key: &K, now: Instant) -> bool {
        match self.inner.peek(key) {
            Some(entry) if entry.is_expired(now) => {
                self.inner.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Inserts a key-value pair with a fresh TTL stamp.
    ///
    /// Returns the previous value if the key was resident, whether or not it
    /// was still live. On an existing key this counts as an access and
    /// raises its frequency; a new key lands in the frequency-1 bucket.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_at(key, value, Instant::now())
    }

    /// [`insert`](Self::insert) with an explicit clock reading.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) -> Option<V> {
        self.inner
            .insert(key, TtlValue::new(value, self.ttl, now))
            .map(TtlValue::into_value)
    }

    /// Gets a value by key.
    ///
    /// An expired entry is evicted and reported as absent, without any
    /// frequency bump. A live hit raises the frequency and resets the TTL.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_at(key, Instant::now())
    }

    /// [`get`](Self::get) with an explicit clock reading.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<&V> {
        if self.expire_if_needed(key, now) {
            return None;
        }
        let entry = self.inner.get_mut(key)?;
        entry.reset(self.ttl, now);
        Some(entry.value())
    }

    /// Returns `true` if the key is present and live.
    ///
    /// An expired entry is evicted and reported as absent. Does not reset
    /// the TTL or bump the frequency.
    pub fn contains_key(&mut self, key: &K) -> bool {
        self.contains_key_at(key, Instant::now())
    }

    /// [`contains_key`](Self::contains_key) with an explicit clock reading.
    pub fn contains_key_at(&mut self, key: &K, now: Instant) -> bool {
        !self.expire_if_needed(key, now) && self.inner.contains(key)
    }

    /// Removes a key, returning its value if it was present and live.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_at(key, Instant::now())
    }

    /// [`remove`](Self::remove) with an explicit clock reading.
    pub fn remove_at(&mut self, key: &K, now: Instant) -> Option<V> {
        if self.expire_if_needed(key, now) {
            return None;
        }
        self.inner.remove(key).map(TtlValue::into_value)
    }

    /// Returns the access frequency of a live key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.frequency(key)
    }

    /// Eagerly removes every expired entry, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    /// [`cleanup_expired`](Self::cleanup_expired) with an explicit clock
    /// reading.
    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let expired: Vec<K> = self
            .inner
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.inner.remove(key);
        }
        expired.len()
    }

    /// Returns the number of resident entries.
    ///
    /// Expired-but-unswept entries are counted until something removes them.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Removes all entries. Capacity and TTL are unchanged.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.inner.debug_validate_invariants();
    }
}

impl<K, V> fmt::Debug for TtlLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlLfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("ttl", &self.ttl)
            .finish()
    }
}
