//! Data structures shared by the cache policies.
//!
//! - [`linked_list`]: slot-backed doubly linked list with stable
//!   [`NodeId`] handles, the ordering backbone of every policy.
//! - [`ttl`]: the [`TtlValue`] expiry envelope used by the TTL cache
//!   wrappers.

pub mod linked_list;
pub mod ttl;

pub use linked_list::{DoublyLinkedList, NodeId};
pub use ttl::TtlValue;
