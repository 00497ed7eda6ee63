//! # Cache Trait Hierarchy
//!
//! Unified interface over the eviction policies, splitting operations into
//! capability layers so generic code can require exactly what it needs.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────────────────────────┐
//!              │            CoreCache<K, V>              │
//!              │                                         │
//!              │  insert(&mut, K, V) → Option<V>         │
//!              │  get(&mut, &K) → Option<&V>             │
//!              │  contains(&, &K) → bool                 │
//!              │  len(&) → usize                         │
//!              │  is_empty(&) → bool                     │
//!              │  capacity(&) → usize                    │
//!              │  clear(&mut)                            │
//!              └──────────────────┬──────────────────────┘
//!                                 │
//!                                 ▼
//!              ┌─────────────────────────────────────────┐
//!              │           MutableCache<K, V>            │
//!              │                                         │
//!              │  remove(&K) → Option<V>                 │
//!              │  remove_batch(&[K]) → Vec<Option<V>>    │
//!              └──────────────────┬──────────────────────┘
//!                                 │
//!              ┌──────────────────┴──────────────────────┐
//!              ▼                                         ▼
//! ┌────────────────────────────┐          ┌────────────────────────────┐
//! │   LruCacheTrait<K, V>      │          │   LfuCacheTrait<K, V>      │
//! │                            │          │                            │
//! │  pop_lru() → (K, V)        │          │  pop_lfu() → (K, V)        │
//! │  peek_lru() → (&K, &V)     │          │  peek_lfu() → (&K, &V)     │
//! │  touch(&K) → bool          │          │  frequency(&K) → u64       │
//! │  recency_rank(&K) → usize  │          │                            │
//! └────────────────────────────┘          └────────────────────────────┘
//! ```
//!
//! The TTL wrappers ([`TtlLruCache`](crate::policy::lru_ttl::TtlLruCache),
//! [`TtlLfuCache`](crate::policy::lfu_ttl::TtlLfuCache)) stay outside the
//! hierarchy: lazy expiry makes their reads destructive (`contains_key` takes
//! `&mut self` because it may evict), which the `&self` contracts here cannot
//! express.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use linkcache::traits::CoreCache;
/// use linkcache::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and the key is new, an entry is evicted
    /// according to the cache's policy before the new entry is inserted.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates the policy's access state (recency or frequency). Use
    /// [`contains`](Self::contains) to check existence without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use linkcache::traits::{CoreCache, MutableCache};
/// use linkcache::policy::lfu::LfuCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::try_new(100).unwrap();
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
///
/// invalidate_keys(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning the removed values in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// Entries are ordered by recency; the least recently accessed entry is
/// evicted first.
///
/// # Example
///
/// ```
/// use linkcache::traits::{CoreCache, LruCacheTrait};
/// use linkcache::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(3).unwrap();
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU; key 2 becomes LRU.
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving the value; key 3 becomes LRU.
/// assert!(cache.touch(&2));
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less
    /// recent). Returns `None` if the key is not found. O(n) walk.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific operations that respect frequency order.
///
/// Entries are ordered by access frequency; the least frequently accessed
/// entry is evicted first, with ties broken by recency within the frequency
/// class.
///
/// # Example
///
/// ```
/// use linkcache::traits::{CoreCache, LfuCacheTrait};
/// use linkcache::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::try_new(10).unwrap();
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// // Access key 2 to raise its frequency above key 1's.
/// cache.get(&2);
/// assert_eq!(cache.frequency(&1), Some(1));
/// assert_eq!(cache.frequency(&2), Some(2));
///
/// let (key, _) = cache.pop_lfu().unwrap();
/// assert_eq!(key, 1);
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry.
    ///
    /// Among entries with the minimum frequency, the least recently used one
    /// is evicted. Returns `None` if the cache is empty.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the LFU entry without removing it or incrementing frequency.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Gets the access frequency for a key, or `None` if it is not present.
    fn frequency(&self, key: &K) -> Option<u64>;
}
