//! # LRU Cache with TTL Expiry
//!
//! [`TtlLruCache`] wraps [`LruCache`] with a per-cache time-to-live. Values
//! are stored in [`TtlValue`] envelopes stamped with an absolute deadline;
//! expiry is enforced lazily at the moment of each read.
//!
//! ## Expiry model
//!
//! ```text
//!   insert(k, v)            stamp deadline = now + ttl
//!   get(k) / contains(k)    deadline passed?  → evict entry, report absent
//!   get(k) hit              restamp deadline AND promote to MRU
//!   cleanup_expired()       eager full sweep, the only non-lazy path
//! ```
//!
//! There is no background timer; an expired entry stays resident (and counts
//! toward `len()`) until a read touches it, eviction claims it, or a sweep
//! collects it. Capacity pressure is handled entirely by the underlying LRU
//! core, so an expired-but-unread entry can still be evicted as the least
//! recently used.
//!
//! ## Deterministic time
//!
//! Every clock-reading operation has an `_at(now: Instant)` twin; the public
//! names call them with `Instant::now()`. Tests drive the `_at` forms with a
//! fixed base instant instead of sleeping.
//!
//! Reads are destructive (they may evict), so `get` and `contains_key` take
//! `&mut self`. That keeps this type out of the [`CoreCache`] hierarchy,
//! whose `contains` contract is `&self`.
//!
//! [`CoreCache`]: crate::traits::CoreCache

use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::ds::TtlValue;
use crate::error::ConfigError;
use crate::policy::lru::LruCache;

/// Recency-ordered cache whose entries expire a fixed TTL after their last
/// write or read.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use linkcache::policy::lru_ttl::TtlLruCache;
///
/// let mut cache = TtlLruCache::try_new(16, Duration::from_secs(60)).unwrap();
/// cache.insert("session", 42);
/// assert_eq!(cache.get(&"session"), Some(&42));
/// ```
pub struct TtlLruCache<K, V> {
    inner: LruCache<K, TtlValue<V>>,
    ttl: Duration,
}

impl<K, V> TtlLruCache<K, V>
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
            inner: LruCache::try_new(capacity)?,
            ttl,
        })
    }

    /// Evicts `key` if its entry has expired as of `now`.
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
    /// was still live. Promotes the entry to most recently used.
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
    /// An expired entry is evicted and reported as absent. A live hit resets
    /// the entry's TTL and promotes it to most recently used.
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
    /// An expired entry is evicted and reported as absent. Does not reset the
    /// TTL or promote the entry.
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

impl<K, V> fmt::Debug for TtlLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlLruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    fn cache() -> (TtlLruCache<i32, i32>, Instant) {
        (TtlLruCache::try_new(3, TTL).unwrap(), Instant::now())
    }

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod construction {
            use super::*;

            #[test]
            fn test_valid_parameters() {
                let cache: TtlLruCache<i32, i32> = TtlLruCache::try_new(5, TTL).unwrap();
                assert_eq!(cache.capacity(), 5);
                assert_eq!(cache.ttl(), TTL);
                assert!(cache.is_empty());
            }

            #[test]
            fn test_zero_capacity_rejected() {
                let err = TtlLruCache::<i32, i32>::try_new(0, TTL).unwrap_err();
                assert_eq!(err.message(), "capacity must be greater than 0");
            }

            #[test]
            fn test_zero_ttl_rejected() {
                let err =
                    TtlLruCache::<i32, i32>::try_new(5, Duration::ZERO).unwrap_err();
                assert_eq!(err.message(), "ttl must be greater than 0");
            }
        }

        mod expiry {
            use super::*;

            #[test]
            fn test_live_within_ttl() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                let almost = t0 + TTL - Duration::from_secs(1);
                assert!(cache.contains_key_at(&1, almost));
                assert_eq!(cache.get_at(&1, almost), Some(&10));
            }

            #[test]
            fn test_get_evicts_expired() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                assert_eq!(cache.get_at(&1, t0 + TTL), None);
                // The lazy read physically removed the entry.
                assert_eq!(cache.len(), 0);
            }

            #[test]
            fn test_contains_evicts_expired() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                assert!(!cache.contains_key_at(&1, t0 + TTL));
                assert_eq!(cache.len(), 0);
            }

            #[test]
            fn test_get_resets_ttl() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                // Read at t0+8 restamps the deadline to t0+18.
                let t8 = t0 + Duration::from_secs(8);
                assert_eq!(cache.get_at(&1, t8), Some(&10));
                assert!(cache.contains_key_at(&1, t0 + Duration::from_secs(15)));
                assert!(!cache.contains_key_at(&1, t0 + Duration::from_secs(18)));
            }

            #[test]
            fn test_contains_does_not_reset_ttl() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                assert!(cache.contains_key_at(&1, t0 + Duration::from_secs(8)));
                assert!(!cache.contains_key_at(&1, t0 + TTL));
            }

            #[test]
            fn test_insert_refreshes_expired_key() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                // Overwriting an expired entry revives the key with a fresh
                // stamp; the dead value comes back as the previous value.
                let t20 = t0 + Duration::from_secs(20);
                assert_eq!(cache.insert_at(1, 20, t20), Some(10));
                assert_eq!(cache.get_at(&1, t20 + Duration::from_secs(5)), Some(&20));
            }

            #[test]
            fn test_remove_expired_returns_none() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);

                assert_eq!(cache.remove_at(&1, t0 + TTL), None);
                assert_eq!(cache.len(), 0);
            }

            #[test]
            fn test_remove_live_returns_value() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                assert_eq!(cache.remove_at(&1, t0 + Duration::from_secs(1)), Some(10));
                assert_eq!(cache.remove_at(&1, t0 + Duration::from_secs(1)), None);
            }
        }

        mod sweep {
            use super::*;

            #[test]
            fn test_cleanup_removes_only_expired() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                cache.insert_at(2, 20, t0 + Duration::from_secs(5));
                cache.insert_at(3, 30, t0 + Duration::from_secs(9));

                // At t0+12 only key 1 has passed its deadline.
                let removed = cache.cleanup_expired_at(t0 + Duration::from_secs(12));
                assert_eq!(removed, 1);
                assert_eq!(cache.len(), 2);
                assert!(cache.contains_key_at(&2, t0 + Duration::from_secs(12)));
                assert!(cache.contains_key_at(&3, t0 + Duration::from_secs(12)));
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_cleanup_on_empty_cache() {
                let (mut cache, t0) = cache();
                assert_eq!(cache.cleanup_expired_at(t0), 0);
            }

            #[test]
            fn test_cleanup_removes_everything_eventually() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                cache.insert_at(2, 20, t0);
                assert_eq!(cache.cleanup_expired_at(t0 + TTL), 2);
                assert!(cache.is_empty());
            }
        }

        mod recency_interaction {
            use super::*;

            #[test]
            fn test_lru_eviction_still_applies() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                cache.insert_at(2, 20, t0);
                cache.insert_at(3, 30, t0);

                // All live; a fourth insert evicts the least recently used.
                cache.insert_at(4, 40, t0 + Duration::from_secs(1));
                assert_eq!(cache.len(), 3);
                assert!(!cache.contains_key_at(&1, t0 + Duration::from_secs(1)));
            }

            #[test]
            fn test_get_protects_from_capacity_eviction() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                cache.insert_at(2, 20, t0);
                cache.insert_at(3, 30, t0);

                let t1 = t0 + Duration::from_secs(1);
                cache.get_at(&1, t1);
                cache.insert_at(4, 40, t1);
                assert!(cache.contains_key_at(&1, t1));
                assert!(!cache.contains_key_at(&2, t1));
            }

            #[test]
            fn test_expired_entry_counts_until_touched() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                cache.insert_at(2, 20, t0 + Duration::from_secs(5));

                // Key 1 is past its deadline but unswept.
                let t12 = t0 + Duration::from_secs(12);
                assert_eq!(cache.len(), 2);
                assert!(!cache.contains_key_at(&1, t12));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn test_clear_then_reuse() {
                let (mut cache, t0) = cache();
                cache.insert_at(1, 10, t0);
                cache.clear();
                assert!(cache.is_empty());
                cache.insert_at(1, 11, t0);
                assert_eq!(cache.get_at(&1, t0), Some(&11));
            }
        }
    }
}
