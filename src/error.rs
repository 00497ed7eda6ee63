//! Error types for the linkcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, zero TTL). Produced by the fallible `try_new`
//!   constructors and never by any other operation.
//! - [`OwnershipError`]: Returned when a node handle is presented to a list
//!   that does not own it. Indicates a bug in the calling code path, not a
//!   runtime condition; correct callers never observe it.
//!
//! Missing keys, invalid indices, and removals of absent entries are expressed
//! as `None`/`false`, never as errors.
//!
//! ## Example Usage
//!
//! ```
//! use linkcache::error::ConfigError;
//! use linkcache::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`TtlLruCache::try_new`](crate::policy::lru_ttl::TtlLruCache::try_new).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use linkcache::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// OwnershipError
// ---------------------------------------------------------------------------

/// Error returned when a node handle is used with a list that does not own it.
///
/// Every [`DoublyLinkedList`](crate::ds::DoublyLinkedList) carries a
/// process-unique tag, stamped into each [`NodeId`](crate::ds::NodeId) it
/// mints. Handle operations reject ids minted by a different list (a foreign
/// handle) as well as ids whose node has already been removed (a stale
/// handle). Either case means the caller's bookkeeping has diverged from the
/// list, so this error is fatal in correct usage rather than recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipError(String);

impl OwnershipError {
    /// Creates a new `OwnershipError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for OwnershipError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be greater than 0");
        assert_eq!(err.to_string(), "capacity must be greater than 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("ttl must be greater than 0");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("ttl must be greater than 0"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- OwnershipError ---------------------------------------------------

    #[test]
    fn ownership_display_shows_message() {
        let err = OwnershipError::new("node handle belongs to another list");
        assert_eq!(err.to_string(), "node handle belongs to another list");
    }

    #[test]
    fn ownership_message_accessor() {
        let err = OwnershipError::new("stale node handle");
        assert_eq!(err.message(), "stale node handle");
    }

    #[test]
    fn ownership_clone_and_eq() {
        let a = OwnershipError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn ownership_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<OwnershipError>();
    }
}
