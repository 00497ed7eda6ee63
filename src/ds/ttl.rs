//! Expiry envelope for TTL-aware caches.
//!
//! [`TtlValue`] pairs a cached value with its absolute expiry instant. The
//! TTL cache wrappers store `TtlValue<V>` inside a plain policy core and
//! consult [`TtlValue::is_expired`] on every read, so expiry is decided at
//! the moment of each call rather than by a background sweeper.
//!
//! All methods take an explicit `now: Instant` so callers control the clock;
//! the cache wrappers pass `Instant::now()` from their public entry points
//! and a fixed instant from tests.

use std::time::{Duration, Instant};

/// A cached value stamped with an absolute expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlValue<V> {
    value: V,
    expires_at: Instant,
}

impl<V> TtlValue<V> {
    /// Wraps `value`, expiring at `now + ttl`.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    /// Returns `true` if the value has expired as of `now`.
    ///
    /// A value is expired exactly when `now >= expires_at`, so an entry whose
    /// lifetime has fully elapsed is expired, not borderline-live.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Restamps the expiry to `now + ttl`, extending the value's lifetime.
    pub fn reset(&mut self, ttl: Duration, now: Instant) {
        self.expires_at = now + ttl;
    }

    /// Returns the wrapped value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the wrapped value mutably.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Unwraps into the inner value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the absolute expiry instant.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}
