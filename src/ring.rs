//! Index-based circular doubly-linked rings.
//!
//! Nodes live in a [`SlotMap`] arena and point at their ring neighbours by
//! [`NodeKey`]. In a circular ring:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail; any member can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so it stops when it returns to the start
//!
//! A node is always in exactly one ring. Detaching a node leaves it as a
//! self-looped singleton, ready to be spliced somewhere else.

use slotmap::{new_key_type, SlotMap};
use std::iter::FusedIterator;

new_key_type! {
    /// Arena key for a heap node
    pub(crate) struct NodeKey;
}

/// Ring neighbours of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) next: NodeKey,
    pub(crate) prev: NodeKey,
}

impl Link {
    /// A link for a singleton ring containing only `key`.
    #[inline]
    pub(crate) fn circular(key: NodeKey) -> Self {
        Link {
            next: key,
            prev: key,
        }
    }
}

/// Arena values that carry a ring [`Link`].
pub(crate) trait Linked {
    fn link(&self) -> &Link;
    fn link_mut(&mut self) -> &mut Link;
}

/// Resets `key` to a singleton ring. Does not touch its old neighbours.
#[inline]
pub(crate) fn make_circular<N: Linked>(arena: &mut SlotMap<NodeKey, N>, key: NodeKey) {
    *arena[key].link_mut() = Link::circular(key);
}

#[inline]
pub(crate) fn is_singleton<N: Linked>(arena: &SlotMap<NodeKey, N>, key: NodeKey) -> bool {
    arena[key].link().next == key
}

/// Inserts the singleton `new` right after `at`.
#[inline]
pub(crate) fn insert_after<N: Linked>(arena: &mut SlotMap<NodeKey, N>, at: NodeKey, new: NodeKey) {
    debug_assert!(is_singleton(arena, new), "new is already in a ring");

    let next = arena[at].link().next;
    arena[at].link_mut().next = new;
    *arena[new].link_mut() = Link { next, prev: at };
    arena[next].link_mut().prev = new;
}

/// Joins the ring containing `a` with the ring containing `b`.
///
/// Before:
///   Ring A: ... <-> a_prev <-> a <-> ...
///   Ring B: ... <-> b_prev <-> b <-> ...
///
/// After:
///   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
///
/// The two rings must be disjoint. Returns an entry point into the merged
/// ring, or the other side if one of them is empty.
pub(crate) fn splice<N: Linked>(
    arena: &mut SlotMap<NodeKey, N>,
    a: Option<NodeKey>,
    b: Option<NodeKey>,
) -> Option<NodeKey> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(b)) => {
            let a_prev = arena[a].link().prev;
            let b_prev = arena[b].link().prev;

            arena[a_prev].link_mut().next = b;
            arena[b].link_mut().prev = a_prev;

            arena[b_prev].link_mut().next = a;
            arena[a].link_mut().prev = b_prev;

            Some(a)
        }
    }
}

/// Closes the gap left by a node that has already been taken out of the
/// arena. `removed` is its old key and `link` its old neighbours.
///
/// Returns a surviving member of the ring, or `None` if the removed node was
/// alone.
pub(crate) fn bridge<N: Linked>(
    arena: &mut SlotMap<NodeKey, N>,
    removed: NodeKey,
    link: Link,
) -> Option<NodeKey> {
    if link.next == removed {
        return None;
    }
    arena[link.prev].link_mut().next = link.next;
    arena[link.next].link_mut().prev = link.prev;
    Some(link.next)
}

/// Detaches `key` from its ring, leaving it a singleton.
///
/// Returns a member of the ring it left, or `None` if it was alone.
pub(crate) fn remove<N: Linked>(arena: &mut SlotMap<NodeKey, N>, key: NodeKey) -> Option<NodeKey> {
    let link = *arena[key].link();
    make_circular(arena, key);
    bridge(arena, key, link)
}

/// Walks the ring containing `start`, beginning at `start`.
pub(crate) fn iter<N: Linked>(arena: &SlotMap<NodeKey, N>, start: NodeKey) -> Keys<'_, N> {
    Keys {
        arena,
        start,
        next: Some(start),
    }
}

/// One-shot iterator over the keys of a ring.
///
/// The ring must not be modified while the iterator is alive, which the
/// shared borrow of the arena guarantees.
pub(crate) struct Keys<'a, N> {
    arena: &'a SlotMap<NodeKey, N>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<'a, N> Keys<'a, N> {
    /// An iterator over no ring at all.
    pub(crate) fn empty(arena: &'a SlotMap<NodeKey, N>) -> Self {
        Keys {
            arena,
            start: NodeKey::default(),
            next: None,
        }
    }
}

impl<N: Linked> Iterator for Keys<'_, N> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let following = self.arena[current].link().next;
        self.next = (following != self.start).then_some(following);
        Some(current)
    }
}

impl<N: Linked> FusedIterator for Keys<'_, N> {}
