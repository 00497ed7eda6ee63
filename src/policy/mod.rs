//! Eviction policy implementations.
//!
//! - [`lru`]: recency-ordered cache.
//! - [`lru_ttl`]: recency-ordered cache with lazy TTL expiry.
//! - [`lfu`]: frequency-ordered cache.
//! - [`lfu_ttl`]: frequency-ordered cache with lazy TTL expiry.

pub mod lfu;
pub mod lfu_ttl;
pub mod lru;
pub mod lru_ttl;
