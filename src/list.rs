//! Arena-backed doubly linked lists.
//!
//! Every node lives in a slot of an [`Arena`] and is addressed by a copyable
//! [`NodeId`]. A [`List`] is nothing more than a pair of sentinel slots in the
//! same arena plus a length, so any number of lists can share one arena and a
//! node can be moved between them (for example from a main list to a ghost
//! list) by relinking its slot. Vacated slots go on a free list and are reused
//! by later insertions.
//!
//! ```text
//!   slots: [ H0 | T0 | H1 | T1 |  a  |  b  |  c  | (free) ]
//!
//!   list 0:  H0 ◄──► a ◄──► c ◄──► T0
//!   list 1:  H1 ◄──► b ◄──► T1
//! ```
//!
//! All operations except iteration are O(1).

use alloc::vec::Vec;
use core::fmt;

/// Handle to a node stored in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

struct Slot<T> {
    /// `None` for sentinels and free slots.
    value: Option<T>,
    prev: usize,
    next: usize,
}

/// A list threaded through an [`Arena`]; `head` and `tail` are sentinel slots.
pub(crate) struct List {
    head: usize,
    tail: usize,
    len: usize,
}

impl List {
    /// Returns the number of nodes linked into the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no nodes are linked into the list.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("len", &self.len).finish()
    }
}

/// Slot storage shared by one or more [`List`]s.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty arena with room for `capacity` slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of value-carrying nodes currently stored (linked or not).
    #[cfg(test)]
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    fn alloc(&mut self, value: Option<T>) -> usize {
        let slot = Slot {
            value,
            prev: 0,
            next: 0,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        // A detached slot points at itself.
        self.slots[idx].prev = idx;
        self.slots[idx].next = idx;
        idx
    }

    fn release(&mut self, idx: usize) -> Option<T> {
        let value = self.slots[idx].value.take();
        self.slots[idx].prev = idx;
        self.slots[idx].next = idx;
        self.free.push(idx);
        value
    }

    /// Allocates the two sentinel slots of a new, empty list.
    pub(crate) fn new_list(&mut self) -> List {
        let head = self.alloc(None);
        let tail = self.alloc(None);
        self.slots[head].next = tail;
        self.slots[tail].prev = head;
        List { head, tail, len: 0 }
    }

    /// Returns the sentinel slots of an empty list to the free list.
    pub(crate) fn release_list(&mut self, list: List) {
        debug_assert!(list.is_empty(), "released list still has nodes");
        self.release(list.head);
        self.release(list.tail);
    }

    /// Stores `value` in a detached node.
    pub(crate) fn insert(&mut self, value: T) -> NodeId {
        let idx = self.alloc(Some(value));
        self.live += 1;
        NodeId(idx)
    }

    /// Frees a detached node and returns its value.
    ///
    /// The node must already be unlinked from every list.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        self.slots.get(id.0)?.value.as_ref()?;
        self.live -= 1;
        self.release(id.0)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0)?.value.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.value.as_mut()
    }

    fn link_after(&mut self, at: usize, idx: usize) {
        let next = self.slots[at].next;
        self.slots[idx].prev = at;
        self.slots[idx].next = next;
        self.slots[at].next = idx;
        self.slots[next].prev = idx;
    }

    fn detach(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
        self.slots[idx].prev = idx;
        self.slots[idx].next = idx;
    }

    /// Links a detached node at the front of `list`.
    pub(crate) fn push_front(&mut self, list: &mut List, id: NodeId) {
        self.link_after(list.head, id.0);
        list.len += 1;
    }

    /// Links a detached node at the back of `list`.
    pub(crate) fn push_back(&mut self, list: &mut List, id: NodeId) {
        let last = self.slots[list.tail].prev;
        self.link_after(last, id.0);
        list.len += 1;
    }

    /// Unlinks a node from `list`, leaving it stored but detached.
    pub(crate) fn unlink(&mut self, list: &mut List, id: NodeId) {
        self.detach(id.0);
        list.len -= 1;
    }

    /// Moves a node already linked into `list` to its front.
    pub(crate) fn move_to_front(&mut self, list: &List, id: NodeId) {
        if self.slots[list.head].next == id.0 {
            return;
        }
        self.detach(id.0);
        self.link_after(list.head, id.0);
    }

    #[inline]
    pub(crate) fn front(&self, list: &List) -> Option<NodeId> {
        let idx = self.slots[list.head].next;
        (idx != list.tail).then_some(NodeId(idx))
    }

    #[inline]
    pub(crate) fn back(&self, list: &List) -> Option<NodeId> {
        let idx = self.slots[list.tail].prev;
        (idx != list.head).then_some(NodeId(idx))
    }

    /// Unlinks and returns the first node of `list`.
    pub(crate) fn pop_front(&mut self, list: &mut List) -> Option<NodeId> {
        let id = self.front(list)?;
        self.unlink(list, id);
        Some(id)
    }

    /// Unlinks and returns the last node of `list`.
    pub(crate) fn pop_back(&mut self, list: &mut List) -> Option<NodeId> {
        let id = self.back(list)?;
        self.unlink(list, id);
        Some(id)
    }

    /// Iterates `list` front to back.
    pub(crate) fn iter<'a>(&'a self, list: &List) -> Iter<'a, T> {
        Iter {
            arena: self,
            cursor: self.slots[list.head].next,
            end: list.tail,
        }
    }

    /// Drops every slot. Lists created from this arena must not be used afterwards.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .field("live", &self.live)
            .finish()
    }
}

/// Front-to-back iterator over the nodes of one list.
pub(crate) struct Iter<'a, T> {
    arena: &'a Arena<T>,
    cursor: usize,
    end: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.end {
            return None;
        }
        let idx = self.cursor;
        let slot = &self.arena.slots[idx];
        self.cursor = slot.next;
        slot.value.as_ref().map(|value| (NodeId(idx), value))
    }
}
