//! # LRU (Least Recently Used) Cache
//!
//! Recency-ordered cache: every access moves the entry to the front of an
//! ordering list, and when a new key would exceed capacity the entry at the
//! back (the least recently used) is evicted.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, NodeId>            order: DoublyLinkedList<(K, V)>
//!   ┌─────────┬─────────┐
//!   │   key   │ NodeId  │               front (MRU)            back (LRU)
//!   ├─────────┼─────────┤                  │                       │
//!   │  "a"    │   #2 ───┼──────────┐       ▼                       ▼
//!   │  "b"    │   #0 ───┼────┐   ┌────┐  ┌────┐                 ┌────┐
//!   │  "c"    │   #1 ───┼──┐ └──►│"b" │◄─┤"a" │◄── ... ────────►│"c" │
//!   └─────────┴─────────┘  │     └────┘  └────┘                 └────┘
//!                          └───────────────────────────────────────┘
//! ```
//!
//! The map provides O(1) key lookup; the handle it stores lets the list
//! promote or detach the entry in O(1) without positional search. The list
//! node carries the key alongside the value so eviction can clean up the map
//! without a reverse index.
//!
//! ## Operation Flow: `get` hit
//!
//! ```text
//!   get("a")
//!     1. map["a"] → NodeId #2
//!     2. order.move_to_front(#2)      (detach + attach at head, O(1))
//!     3. return &order[#2].value
//! ```
//!
//! ## Operation Flow: `insert` at capacity
//!
//! ```text
//!   insert("d", v)   with len == capacity, "d" not present
//!     1. order.pop_back() → ("c", _)  (LRU entry)
//!     2. map.remove("c")
//!     3. order.push_front(("d", v)) → NodeId
//!     4. map.insert("d", NodeId)
//! ```
//!
//! ## Performance
//! - `insert` / `get` / `peek` / `remove` / `pop_lru`: O(1) expected
//! - `recency_rank`: O(n) list walk
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap externally for shared use.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{DoublyLinkedList, NodeId};
use crate::error::ConfigError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Recency-ordered cache with O(1) access and eviction.
///
/// # Example
///
/// ```
/// use linkcache::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(2).unwrap();
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // Reading "a" protects it; "b" becomes the eviction candidate.
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.insert("c", 3);
///
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// assert!(cache.contains(&"c"));
/// ```
pub struct LruCache<K, V> {
    map: FxHashMap<K, NodeId>,
    // Front is most recently used, back is the eviction candidate.
    order: DoublyLinkedList<(K, V)>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
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
            order: DoublyLinkedList::with_capacity(capacity),
            capacity,
        })
    }

    /// Inserts a key-value pair, returning the previous value if any.
    ///
    /// Updating an existing key promotes it to most recently used. A new key
    /// at capacity first evicts the least recently used entry.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            let (_, slot) = self
                .order
                .get_mut(id)
                .expect("lru map entry out of sync with list");
            let old = std::mem::replace(slot, value);
            self.order
                .move_to_front(id)
                .expect("lru map entry out of sync with list");
            return Some(old);
        }

        if self.map.len() >= self.capacity {
            self.pop_lru();
        }
        let id = self.order.push_front((key.clone(), value));
        self.map.insert(key, id);
        None
    }

    /// Gets a value by key, promoting the entry to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.order
            .move_to_front(id)
            .expect("lru map entry out of sync with list");
        self.order.get(id).map(|(_, v)| v)
    }

    /// Gets a mutable reference to a value, promoting the entry.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.map.get(key)?;
        self.order
            .move_to_front(id)
            .expect("lru map entry out of sync with list");
        self.order.get_mut(id).map(|(_, v)| v)
    }

    /// Gets a value by key without updating recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.order.get(id).map(|(_, v)| v)
    }

    /// Returns `true` if the key is present; does not update recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(key)?;
        let (_, value) = self
            .order
            .remove_node(id)
            .expect("lru map entry out of sync with list");
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_back()?;
        self.map.remove(&key);
        Some((key, value))
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|(k, v)| (k, v))
    }

    /// Promotes a key to most recently used without reading its value.
    ///
    /// Returns `true` if the key was present.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(&id) => {
                self.order
                    .move_to_front(id)
                    .expect("lru map entry out of sync with list");
                true
            }
            None => false,
        }
    }

    /// Returns the recency rank of a key (0 = most recent). O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let id = *self.map.get(key)?;
        self.order.iter_ids().position(|candidate| candidate == id)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|(k, v)| (k, v))
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
        self.order.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.map.len() <= self.capacity);
        assert_eq!(self.map.len(), self.order.len());
        self.order.debug_validate_invariants();
        for (key, &id) in &self.map {
            let (node_key, _) = self.order.get(id).expect("lru map entry out of sync");
            assert!(node_key == key);
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("mru", &self.order.front().map(|(k, _)| k))
            .field("lru", &self.order.back().map(|(k, _)| k))
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
