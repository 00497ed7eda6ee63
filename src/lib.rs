//! linkcache: LRU, LFU, and TTL cache policies built on a shared
//! handle-addressable doubly linked list.
//!
//! The [`ds::DoublyLinkedList`] primitive provides O(1) splice and removal
//! through stable [`ds::NodeId`] handles; the [`policy`] module builds the
//! four caches on top of it. See the module docs for per-policy semantics.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
