//! Doubly linked list with stable node handles and an index API.
//!
//! Stores nodes in slot storage (a `Vec` plus free list) and links them by
//! slot index, enabling stable handles and O(1) splice/remove operations
//! without pointer chasing.
//!
//! ## Architecture
//!
//! ```text
//!   slots (Vec<Option<Node<T>>>)
//!   ┌──────┬─────────────────────────────────────────────┐
//!   │ slot │ Node { value, prev, next }                  │
//!   ├──────┼─────────────────────────────────────────────┤
//!   │  0   │ { value: A, prev: None, next: Some(1) }     │
//!   │  1   │ { value: B, prev: Some(0), next: Some(2) }  │
//!   │  2   │ { value: C, prev: Some(1), next: None }     │
//!   └──────┴─────────────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [1] ◄──► [2] ◄── tail
//! ```
//!
//! ## Two capability sets
//!
//! The list deliberately exposes two separate APIs:
//!
//! - **Handle API** (`move_to_front`, `remove_node`, `pop_back`): O(1)
//!   operations addressed by [`NodeId`], used exclusively by the cache
//!   policies for reordering and eviction without positional search.
//! - **Index API** (`get_index`, `set_index`, `insert_index`,
//!   `remove_index`): positional operations for generic list consumers,
//!   O(min(i, len - i)) via nearest-end traversal.
//!
//! A [`NodeId`] carries the tag of the list that minted it; presenting it to
//! any other list yields an [`OwnershipError`] instead of silently corrupting
//! links.
//!
//! ## Performance
//! - `push_front` / `push_back` / `pop_front` / `pop_back`: O(1)
//! - `move_to_front` / `remove_node`: O(1)
//! - `get_index` / `set_index` / `insert_index` / `remove_index`:
//!   O(min(i, len - i))
//! - `reverse`: O(len)
//! - `iter` / `drain`: O(len)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::OwnershipError;

static NEXT_LIST_TAG: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a node inside one specific [`DoublyLinkedList`].
///
/// Handles are minted by the list on insertion and become stale once the node
/// is removed. The embedded list tag prevents a handle obtained from one list
/// from being accepted by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    list: u64,
    slot: usize,
}

impl NodeId {
    /// Returns the slot index backing this handle.
    pub fn index(self) -> usize {
        self.slot
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Ordered collection with O(1) handle-based mutation and positional access.
#[derive(Debug)]
pub struct DoublyLinkedList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    tag: u64,
}

impl<T> DoublyLinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            tag: NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            tag: NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` is currently a live node of this list.
    pub fn contains(&self, id: NodeId) -> bool {
        id.list == self.tag
            && self
                .slots
                .get(id.slot)
                .map(|slot| slot.is_some())
                .unwrap_or(false)
    }

    /// Resolves a handle to its slot index, rejecting foreign and stale ids.
    fn own(&self, id: NodeId) -> Result<usize, OwnershipError> {
        if id.list != self.tag {
            return Err(OwnershipError::new(
                "node handle belongs to another list",
            ));
        }
        if self.slots.get(id.slot).map(|s| s.is_some()) != Some(true) {
            return Err(OwnershipError::new("stale node handle"));
        }
        Ok(id.slot)
    }

    fn id(&self, slot: usize) -> NodeId {
        NodeId {
            list: self.tag,
            slot,
        }
    }

    fn node(&self, slot: usize) -> &Node<T> {
        self.slots[slot].as_ref().expect("list node missing")
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        self.slots[slot].as_mut().expect("list node missing")
    }

    fn alloc(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let slot = if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            slot
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        self.len += 1;
        slot
    }

    fn dealloc(&mut self, slot: usize) -> T {
        let node = self.slots[slot].take().expect("list node missing");
        self.free.push(slot);
        self.len -= 1;
        node.value
    }

    // -- Handle API (used by the cache policies) --------------------------

    /// Returns the value for a node handle, if it is live in this list.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if id.list != self.tag {
            return None;
        }
        self.slots
            .get(id.slot)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if it is live in this list.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id.list != self.tag {
            return None;
        }
        self.slots
            .get_mut(id.slot)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let slot = self.alloc(value);
        self.attach_front(slot);
        self.id(slot)
    }

    /// Inserts a new node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let slot = self.alloc(value);
        self.attach_back(slot);
        self.id(slot)
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let slot = self.head?;
        self.detach(slot);
        Some(self.dealloc(slot))
    }

    /// Removes and returns the back value.
    ///
    /// The back of the list is the eviction end for the cache policies; the
    /// returned element carries everything the caller needs (the policies
    /// store the key inside the element), so no handle survives the removal.
    pub fn pop_back(&mut self) -> Option<T> {
        let slot = self.tail?;
        self.detach(slot);
        Some(self.dealloc(slot))
    }

    /// Moves an existing node to the front.
    ///
    /// This is the recency-promotion primitive: detach plus re-attach at the
    /// head in one O(1) splice.
    pub fn move_to_front(&mut self, id: NodeId) -> Result<(), OwnershipError> {
        let slot = self.own(id)?;
        if self.head == Some(slot) {
            return Ok(());
        }
        self.detach(slot);
        self.attach_front(slot);
        Ok(())
    }

    /// Detaches an arbitrary node by handle and returns its value.
    pub fn remove_node(&mut self, id: NodeId) -> Result<T, OwnershipError> {
        let slot = self.own(id)?;
        self.detach(slot);
        Ok(self.dealloc(slot))
    }

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|slot| &self.node(slot).value)
    }

    /// Returns the handle at the front of the list.
    pub fn front_id(&self) -> Option<NodeId> {
        self.head.map(|slot| self.id(slot))
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|slot| &self.node(slot).value)
    }

    /// Returns the handle at the back of the list.
    pub fn back_id(&self) -> Option<NodeId> {
        self.tail.map(|slot| self.id(slot))
    }

    // -- Index API (generic list consumers) --------------------------------

    /// Finds the slot at `index` by walking from the nearest end.
    fn slot_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        if index < self.len / 2 {
            let mut current = self.head;
            for _ in 0..index {
                current = self.node(current?).next;
            }
            current
        } else {
            let mut current = self.tail;
            for _ in 0..(self.len - 1 - index) {
                current = self.node(current?).prev;
            }
            current
        }
    }

    /// Returns the value at `index`, or `None` if out of bounds.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.slot_at(index).map(|slot| &self.node(slot).value)
    }

    /// Returns a mutable reference to the value at `index`.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot_at(index)?;
        Some(&mut self.node_mut(slot).value)
    }

    /// Replaces the value at `index`; returns `false` if out of bounds.
    pub fn set_index(&mut self, index: usize, value: T) -> bool {
        match self.slot_at(index) {
            Some(slot) => {
                self.node_mut(slot).value = value;
                true
            }
            None => false,
        }
    }

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// Delegates to `push_front`/`push_back` at the boundaries. Returns the
    /// new node's handle, or `None` if `index > len`.
    pub fn insert_index(&mut self, index: usize, value: T) -> Option<NodeId> {
        if index == 0 {
            return Some(self.push_front(value));
        }
        if index == self.len {
            return Some(self.push_back(value));
        }
        let after = self.slot_at(index)?;
        let slot = self.alloc(value);
        self.attach_before(slot, after);
        Some(self.id(slot))
    }

    /// Removes and returns the value at `index`, or `None` if out of bounds.
    pub fn remove_index(&mut self, index: usize) -> Option<T> {
        let slot = self.slot_at(index)?;
        self.detach(slot);
        Some(self.dealloc(slot))
    }

    /// Reverses the list in place, swapping head and tail.
    ///
    /// No-op for lists of length 0 or 1.
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }
        let mut current = self.head;
        while let Some(slot) = current {
            let node = self.node_mut(slot);
            let next = node.next;
            node.next = node.prev;
            node.prev = next;
            current = next;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a lazy, restartable iterator from front to back.
    ///
    /// Does not mutate the list; may be called any number of times.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of handles from front to back.
    pub fn iter_ids(&self) -> IdIter<'_, T> {
        IdIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns a draining iterator that removes elements from the front as it
    /// is advanced.
    ///
    /// The sequence is one-shot: once exhausted (or dropped), the list is
    /// empty.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { list: self }
    }

    // -- Link surgery ------------------------------------------------------

    fn detach(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };

        match prev {
            Some(prev_slot) => self.node_mut(prev_slot).next = next,
            None => self.head = next,
        }
        match next {
            Some(next_slot) => self.node_mut(next_slot).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(slot);
        node.prev = None;
        node.next = None;
    }

    fn attach_front(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head_slot) => self.node_mut(head_slot).prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn attach_back(&mut self, slot: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(slot);
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(tail_slot) => self.node_mut(tail_slot).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    fn attach_before(&mut self, slot: usize, after: usize) {
        let prev = self.node(after).prev;
        {
            let node = self.node_mut(slot);
            node.prev = prev;
            node.next = Some(after);
        }
        self.node_mut(after).prev = Some(slot);
        match prev {
            Some(prev_slot) => self.node_mut(prev_slot).next = Some(slot),
            None => self.head = Some(slot),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(slot) = current {
            assert!(seen.insert(slot));
            let node = self.slots[slot].as_ref().expect("list node missing");
            assert_eq!(node.prev, prev);
            if let Some(next_slot) = node.next {
                let next_node = self.slots[next_slot]
                    .as_ref()
                    .expect("next list node missing");
                assert_eq!(next_node.prev, Some(slot));
            } else {
                assert_eq!(self.tail, Some(slot));
            }

            prev = Some(slot);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// Non-mutating iterator over values from front to back.
pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current?;
        let node = self.list.slots[slot].as_ref()?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Iterator over node handles from front to back.
pub struct IdIter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for IdIter<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current?;
        let node = self.list.slots[slot].as_ref()?;
        self.current = node.next;
        Some(self.list.id(slot))
    }
}

/// One-shot draining iterator; removes from the front on each step.
///
/// Dropping the iterator removes any elements not yet yielded, leaving the
/// list empty either way.
pub struct Drain<'a, T> {
    list: &'a mut DoublyLinkedList<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        while self.list.pop_front().is_some() {}
    }
}
