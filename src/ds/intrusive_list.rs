//! Recency list whose nodes live in a [`SlotArena`].
//!
//! Links are [`SlotId`]s rather than pointers. Anyone holding a node's id
//! (the LRU index does) can unlink or promote it in O(1) without walking.
//!
//! ```text
//!   slot   value   prev    next
//!   ────   ─────   ─────   ─────
//!    0       b      2       1
//!    1       a      0       -      ◄── tail (evicted first)
//!    2       c      -       0      ◄── head (most recent)
//!
//!   walk from head: c ─► b ─► a
//! ```
//!
//! Every operation except `iter` is O(1). Debug and test builds also get
//! `debug_validate_invariants`, which walks the chain and asserts each back
//! link.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose nodes are addressed by stable [`SlotId`]s.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Reserves arena room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Value at the tail (least recently placed).
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Iterates values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts a new node at the head and returns its id.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Unlinks and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks the node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the head; returns `false` if `id` is unknown.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.arena.get_mut(prev_id) {
                    node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.arena.get_mut(next_id) {
                    node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|head| self.arena.get_mut(head)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev);
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in list");
        }
        assert_eq!(self.tail, prev);
        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over an [`IntrusiveList`].
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!((list.head, list.tail), (Some(c), Some(a)));
        assert_eq!(list.back(), Some(&"a"));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_from_tail_middle_and_head() {
        let mut list = IntrusiveList::with_capacity(3);
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec![1, 3, 2]);
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec![3, 1, 2]);
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec![3, 1, 2]);
        assert_eq!(list.tail, Some(b));
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_and_remove_keep_links() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["c", "a"]);
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.get(a), None);
        assert_eq!((list.head, list.tail), (Some(c), Some(c)));
        assert_eq!(list.pop_back(), Some("c"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn stale_ids_are_rejected() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(10);
        list.remove(a);
        assert!(!list.move_to_front(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.get(a), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut list = IntrusiveList::new();
        let id = list.push_front(10);
        *list.get_mut(id).unwrap() = 20;
        assert_eq!(list.get(id), Some(&20));
    }
}
