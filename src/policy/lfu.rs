//! # LFU (Least Frequently Used) Cache
//!
//! Frequency-ordered cache using the classic O(1) frequency-bucket scheme:
//! entries with the same access count share a recency-ordered bucket list,
//! and a running `min_freq` points at the bucket holding the eviction
//! candidates.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, EntryMeta>        buckets: FxHashMap<u64, DoublyLinkedList<(K, V)>>
//!   ┌─────────┬──────────────┐
//!   │   key   │ freq, NodeId │            freq 1 (min_freq)    freq 2        freq 5
//!   ├─────────┼──────────────┤            ┌──────────────┐  ┌──────────┐  ┌──────────┐
//!   │  "a"    │  5, #0       │            │ front: "d"   │  │ "c"      │  │ "a"      │
//!   │  "b"    │  1, #1       │            │ back:  "b" ◄─┼── eviction    └──────────┘
//!   │  "c"    │  2, #2       │            └──────────────┘    candidate
//!   │  "d"    │  1, #3       │
//!   └─────────┴──────────────┘
//! ```
//!
//! ## Frequency lifecycle
//!
//! ```text
//!   insert (new key)         get / insert (existing key)        evict
//!   ──────────────────       ───────────────────────────        ─────────────────
//!   freq := 1                freq f → f+1                       pop back of the
//!   bucket[1] front          detach from bucket[f],             min_freq bucket
//!   min_freq := 1            attach front of bucket[f+1];       (least recent among
//!                            if bucket[f] emptied and           least frequent)
//!                            f == min_freq: min_freq := f+1
//! ```
//!
//! Empty buckets are dropped from the map immediately. `remove` may empty the
//! `min_freq` bucket while higher buckets survive; the new minimum is found by
//! scanning the remaining bucket keys (O(#distinct frequencies), a delete-only
//! cost).
//!
//! ## Performance
//! - `insert` / `get` / `peek` / `pop_lfu` / `frequency`: O(1) expected
//! - `remove`: O(1) expected plus a bucket-key scan when it empties the
//!   minimum bucket
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap externally for shared use.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{DoublyLinkedList, NodeId};
use crate::error::ConfigError;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

#[derive(Debug, Clone, Copy)]
struct EntryMeta {
    freq: u64,
    id: NodeId,
}

/// Frequency-ordered cache with O(1) access and eviction.
///
/// Eviction removes the least frequently used entry; ties within the minimum
/// frequency class are broken by evicting the least recently used of them.
///
/// # Example
///
/// ```
/// use linkcache::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::try_new(2).unwrap();
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // "a" is now more frequent than "b".
/// cache.get(&"a");
///
/// cache.insert("c", 3);
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// ```
pub struct LfuCache<K, V> {
    map: FxHashMap<K, EntryMeta>,
    // Bucket lists are recency-ordered: front is the most recent entry at
    // that frequency, back is the eviction candidate.
    buckets: FxHashMap<u64, DoublyLinkedList<(K, V)>>,
    min_freq: u64,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self {
            map: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
            capacity,
        })
    }

    /// Moves a resident entry from its frequency bucket to the next one.
    fn bump(&mut self, key: &K) -> Option<u64> {
        let EntryMeta { freq, id } = *self.map.get(key)?;
        let bucket = self
            .buckets
            .get_mut(&freq)
            .expect("lfu bucket missing for resident entry");
        let entry = bucket.remove_node(id).expect("lfu entry missing");
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            if self.min_freq == freq {
                self.min_freq = freq + 1;
            }
        }

        let new_freq = freq + 1;
        let new_id = self.buckets.entry(new_freq).or_default().push_front(entry);
        let meta = self.map.get_mut(key).expect("lfu map entry missing");
        meta.freq = new_freq;
        meta.id = new_id;
        Some(new_freq)
    }

    fn recompute_min_freq(&mut self) {
        self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
    }

    /// Inserts a key-value pair, returning the previous value if any.
    ///
    /// Updating an existing key counts as an access and raises its frequency.
    /// A new key at capacity first evicts the least frequently used entry,
    /// then lands in the frequency-1 bucket.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.map.contains_key(&key) {
            self.bump(&key);
            let EntryMeta { freq, id } = self.map[&key];
            let bucket = self
                .buckets
                .get_mut(&freq)
                .expect("lfu bucket missing for resident entry");
            let (_, slot) = bucket.get_mut(id).expect("lfu entry missing");
            return Some(std::mem::replace(slot, value));
        }

        if self.map.len() >= self.capacity {
            self.pop_lfu();
        }
        let id = self
            .buckets
            .entry(1)
            .or_default()
            .push_front((key.clone(), value));
        self.map.insert(key, EntryMeta { freq: 1, id });
        // A fresh entry always defines the minimum frequency class.
        self.min_freq = 1;
        None
    }

    /// Gets a value by key, raising the entry's frequency by one.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.bump(key)?;
        let EntryMeta { freq, id } = self.map[key];
        self.buckets
            .get(&freq)
            .expect("lfu bucket missing for resident entry")
            .get(id)
            .map(|(_, v)| v)
    }

    /// Gets a mutable reference to a value, raising its frequency by one.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.bump(key)?;
        let EntryMeta { freq, id } = self.map[key];
        self.buckets
            .get_mut(&freq)
            .expect("lfu bucket missing for resident entry")
            .get_mut(id)
            .map(|(_, v)| v)
    }

    /// Gets a value by key without affecting its frequency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let EntryMeta { freq, id } = *self.map.get(key)?;
        self.buckets.get(&freq)?.get(id).map(|(_, v)| v)
    }

    /// Returns `true` if the key is present; does not affect frequency.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes a key, returning its value if it was present.
    ///
    /// If this empties the minimum-frequency bucket, the new minimum is
    /// recomputed from the surviving buckets.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let EntryMeta { freq, id } = self.map.remove(key)?;
        let bucket = self
            .buckets
            .get_mut(&freq)
            .expect("lfu bucket missing for resident entry");
        let (_, value) = bucket.remove_node(id).expect("lfu entry missing");
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            if self.min_freq == freq {
                self.recompute_min_freq();
            }
        }
        Some(value)
    }

    /// Removes and returns the least frequently used entry.
    ///
    /// Ties within the minimum frequency class fall to the least recently
    /// used entry of that class.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        if self.map.is_empty() {
            return None;
        }
        let freq = self.min_freq;
        let bucket = self
            .buckets
            .get_mut(&freq)
            .expect("lfu min bucket missing");
        let (key, value) = bucket.pop_back().expect("lfu min bucket empty");
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            self.recompute_min_freq();
        }
        self.map.remove(&key);
        Some((key, value))
    }

    /// Peeks at the least frequently used entry without removing it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.buckets
            .get(&self.min_freq)?
            .back()
            .map(|(k, v)| (k, v))
    }

    /// Returns the access frequency of a key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.map.get(key).map(|meta| meta.freq)
    }

    /// Iterates all entries.
    ///
    /// Order is unspecified across frequency classes; within a class, entries
    /// come out most to least recent.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.iter())
            .map(|(k, v)| (k, v))
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.map.len() <= self.capacity);
        let bucket_total: usize = self.buckets.values().map(|b| b.len()).sum();
        assert_eq!(self.map.len(), bucket_total);

        for bucket in self.buckets.values() {
            assert!(!bucket.is_empty());
            bucket.debug_validate_invariants();
        }
        if !self.map.is_empty() {
            let min = self.buckets.keys().copied().min().expect("no buckets");
            assert_eq!(self.min_freq, min);
        }
        for (key, meta) in &self.map {
            let bucket = self.buckets.get(&meta.freq).expect("bucket missing");
            let (node_key, _) = bucket.get(meta.id).expect("entry missing");
            assert!(node_key == key);
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        LfuCache::pop_lfu(self)
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("min_freq", &self.min_freq)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn test_new_cache_creation() {
                let cache: LfuCache<i32, i32> = LfuCache::try_new(10).unwrap();
                assert_eq!(cache.capacity(), 10);
                assert!(cache.is_empty());
            }

            #[test]
            fn test_zero_capacity_rejected() {
                let err = LfuCache::<i32, i32>::try_new(0).unwrap_err();
                assert_eq!(err.message(), "capacity must be greater than 0");
            }

            #[test]
            fn test_insert_and_get() {
                let mut cache = LfuCache::try_new(5).unwrap();
                assert_eq!(cache.insert(1, 100), None);
                assert_eq!(cache.get(&1), Some(&100));
                assert_eq!(cache.get(&2), None);
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_insert_duplicate_key_updates_and_bumps() {
                let mut cache = LfuCache::try_new(5).unwrap();
                assert_eq!(cache.insert(1, 100), None);
                assert_eq!(cache.frequency(&1), Some(1));

                assert_eq!(cache.insert(1, 200), Some(100));
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.frequency(&1), Some(2));
                assert_eq!(cache.peek(&1), Some(&200));
            }

            #[test]
            fn test_peek_does_not_bump() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                assert_eq!(cache.peek(&1), Some(&10));
                assert_eq!(cache.peek(&1), Some(&10));
                assert_eq!(cache.frequency(&1), Some(1));
            }

            #[test]
            fn test_remove() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                assert_eq!(cache.remove(&1), Some(10));
                assert_eq!(cache.remove(&1), None);
                assert!(cache.is_empty());
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_clear() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                cache.insert(2, 20);
                cache.get(&1);
                cache.clear();
                assert!(cache.is_empty());
                cache.clear();
                assert!(cache.is_empty());
                cache.insert(3, 30);
                assert_eq!(cache.frequency(&3), Some(1));
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_get_mut_bumps_and_updates() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                if let Some(v) = cache.get_mut(&1) {
                    *v = 20;
                }
                assert_eq!(cache.peek(&1), Some(&20));
                assert_eq!(cache.frequency(&1), Some(2));
            }
        }

        mod frequency_tracking {
            use super::*;

            #[test]
            fn test_frequency_counts_accesses() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                assert_eq!(cache.frequency(&1), Some(1));

                cache.get(&1);
                cache.get(&1);
                assert_eq!(cache.frequency(&1), Some(3));
                assert_eq!(cache.frequency(&99), None);
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_min_freq_follows_bumps() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                cache.insert(2, 20);

                // Both at freq 1; bumping one leaves the other as minimum.
                cache.get(&1);
                assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));

                // Bumping the last freq-1 entry advances the minimum class.
                cache.get(&2);
                cache.get(&2);
                assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_remove_recomputes_min_freq() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10); // freq 1
                cache.insert(2, 20);
                cache.get(&2);
                cache.get(&2); // freq 3

                // Removing the only freq-1 entry leaves freq 3 as minimum.
                cache.remove(&1);
                assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));
                cache.debug_validate_invariants();

                // Removing the last entry empties everything.
                cache.remove(&2);
                assert!(cache.is_empty());
                assert_eq!(cache.peek_lfu(), None);
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_fresh_insert_resets_min_freq() {
                let mut cache = LfuCache::try_new(5).unwrap();
                cache.insert(1, 10);
                cache.get(&1);
                cache.get(&1); // freq 3, min_freq 3

                cache.insert(2, 20);
                assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));
                cache.debug_validate_invariants();
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn test_evicts_least_frequent() {
                let mut cache = LfuCache::try_new(2).unwrap();
                cache.insert(1, 10);
                cache.insert(2, 20);
                cache.get(&1); // freq 2 vs freq 1

                cache.insert(3, 30);
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
                assert!(cache.contains(&3));
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_tie_break_evicts_least_recent() {
                let mut cache = LfuCache::try_new(2).unwrap();
                cache.insert(1, 10);
                cache.insert(2, 20);

                // Same frequency; key 1 is the older entry in the class.
                cache.insert(3, 30);
                assert!(!cache.contains(&1));
                assert!(cache.contains(&2));
                assert!(cache.contains(&3));
            }

            #[test]
            fn test_get_breaks_tie_by_recency() {
                let mut cache = LfuCache::try_new(2).unwrap();
                cache.insert(1, 10);
                cache.insert(2, 20);

                // Raise both to freq 2; key 1 was bumped last so key 2 is the
                // least recent of the class.
                cache.get(&2);
                cache.get(&1);

                cache.insert(3, 30);
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn test_pop_lfu_order() {
                let mut cache = LfuCache::try_new(3).unwrap();
                cache.insert(1, 10);
                cache.insert(2, 20);
                cache.insert(3, 30);
                cache.get(&1);
                cache.get(&1);
                cache.get(&2);

                // freq: 3 → 1, 2 → 2, 1 → 3
                assert_eq!(cache.pop_lfu(), Some((3, 30)));
                assert_eq!(cache.pop_lfu(), Some((2, 20)));
                assert_eq!(cache.pop_lfu(), Some((1, 10)));
                assert_eq!(cache.pop_lfu(), None);
            }

            #[test]
            fn test_capacity_one() {
                let mut cache = LfuCache::try_new(1).unwrap();
                cache.insert(1, 10);
                cache.get(&1);
                cache.insert(2, 20);
                assert!(!cache.contains(&1));
                assert_eq!(cache.get(&2), Some(&20));
                cache.debug_validate_invariants();
            }

            #[test]
            fn test_size_bound_under_churn() {
                let mut cache = LfuCache::try_new(3).unwrap();
                for i in 0..20 {
                    cache.insert(i % 7, i);
                    if i % 3 == 0 {
                        cache.get(&(i % 7));
                    }
                    assert!(cache.len() <= 3);
                    cache.debug_validate_invariants();
                }
            }
        }

        mod trait_impls {
            use super::*;
            use crate::traits::LfuCacheTrait;

            #[test]
            fn test_usable_through_traits() {
                fn exercise<C: LfuCacheTrait<u64, String>>(cache: &mut C) {
                    cache.insert(1, "one".to_string());
                    cache.insert(2, "two".to_string());
                    cache.get(&2);
                    assert_eq!(cache.frequency(&2), Some(2));
                    assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some(1));
                    assert_eq!(cache.remove(&2), Some("two".to_string()));
                    assert!(cache.is_empty());
                }
                let mut cache = LfuCache::try_new(10).unwrap();
                exercise(&mut cache);
            }

            #[test]
            fn test_debug_output() {
                let mut cache = LfuCache::try_new(2).unwrap();
                cache.insert(1, 10);
                let dbg = format!("{:?}", cache);
                assert!(dbg.contains("LfuCache"));
                assert!(dbg.contains("min_freq"));
            }
        }
    }
}
