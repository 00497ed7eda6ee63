//! Flat re-exports of the crate's public surface.
//!
//! ```
//! use linkcache::prelude::*;
//!
//! let mut cache = LruCache::try_new(8).unwrap();
//! cache.insert("k", 1);
//! assert_eq!(cache.get(&"k"), Some(&1));
//! ```

pub use crate::ds::{DoublyLinkedList, NodeId, TtlValue};
pub use crate::error::{ConfigError, OwnershipError};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lfu_ttl::TtlLfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::lru_ttl::TtlLruCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache};
