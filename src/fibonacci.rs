//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, find_min and decrease_key
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked ring, and so are the children of every node. The heap
//! keeps the key of the minimum root.
//!
//! All nodes live in a [`slotmap::SlotMap`] arena and refer to each other by
//! generational keys, so there are no reference cycles and no `unsafe`. Handles
//! returned by [`FibonacciHeap::insert`] carry the arena key plus the id of the heap
//! that issued them; a handle whose element was extracted, or that belongs to a
//! different heap, is rejected with [`HeapError::InvalidHandle`].

use crate::ring::{self, Link, Linked, NodeKey};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use log::{debug, trace};
use slotmap::{SecondaryMap, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct HeapId(u64);

impl HeapId {
    fn next() -> Self {
        HeapId(NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an element in a Fibonacci heap
///
/// Handles are cheap to copy. They stay valid until their element is extracted
/// and are only accepted by the heap that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: HeapId,
    key: NodeKey,
}

impl Handle for FibonacciHandle {}

pub(crate) struct Node<T, P> {
    pub(crate) item: T,
    pub(crate) priority: P,
    pub(crate) parent: Option<NodeKey>,
    /// Entry point into the child ring; any child, not necessarily the smallest.
    pub(crate) child: Option<NodeKey>,
    pub(crate) link: Link,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
}

impl<T, P> Linked for Node<T, P> {
    #[inline]
    fn link(&self) -> &Link {
        &self.link
    }

    #[inline]
    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Ok((&1, &"item")));
/// assert_eq!(heap.extract_min(), Ok((1, "item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    pub(crate) nodes: SlotMap<NodeKey, Node<T, P>>,
    pub(crate) min: Option<NodeKey>,
    id: HeapId,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap whose arena can hold `capacity` elements
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        FibonacciHeap {
            nodes: SlotMap::with_capacity_and_key(capacity),
            min: None,
            id: HeapId::next(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts an element and returns a handle for later `decrease_key` calls.
    ///
    /// The new node joins the root ring next to the current minimum. O(1).
    pub fn insert(&mut self, priority: P, item: T) -> FibonacciHandle {
        let key = self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            parent: None,
            child: None,
            link: Link::circular(key),
            degree: 0,
            marked: false,
        });

        self.add_root(key);
        self.debug_verify();
        FibonacciHandle { heap: self.id, key }
    }

    /// Returns the minimum priority and its item.
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if there are no elements.
    pub fn find_min(&self) -> Result<(&P, &T), HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        let node = &self.nodes[min];
        Ok((&node.priority, &node.item))
    }

    /// Removes and returns the minimum element, then consolidates the roots so
    /// that no two share a degree.
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if there are no elements.
    pub fn extract_min(&mut self) -> Result<(P, T), HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        let node = self.nodes.remove(min).ok_or(HeapError::EmptyHeap)?;

        let others = ring::bridge(&mut self.nodes, min, node.link);
        match ring::splice(&mut self.nodes, others, node.child) {
            Some(start) => self.consolidate(start),
            None => self.min = None,
        }

        self.debug_verify();
        Ok((node.priority, node.item))
    }

    /// Lowers the priority of the element behind `handle`.
    ///
    /// If the node now sits below its parent it is cut into the root ring, and
    /// every marked ancestor above it is cut too; the first unmarked non-root
    /// ancestor gets marked. O(1) amortized.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] for stale or foreign handles.
    /// - [`HeapError::KeyOrderViolation`] if `new_priority` is larger than the
    ///   current priority; nothing is changed.
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let key = self.resolve(handle)?;
        if new_priority > self.nodes[key].priority {
            return Err(HeapError::KeyOrderViolation);
        }
        self.nodes[key].priority = new_priority;

        let parent = self.nodes[key].parent;
        if let Some(parent) = parent {
            if self.nodes[key].priority < self.nodes[parent].priority {
                self.cut(key, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.nodes[key].priority < self.nodes[min].priority {
                self.min = Some(key);
            }
        }

        self.debug_verify();
        Ok(())
    }

    /// Moves every element of `other` into this heap.
    ///
    /// The nodes are re-keyed into this heap's arena (O(m) for m moved
    /// elements) and the two root rings are spliced in O(1). Handles issued by
    /// `other` are invalid afterwards; handles issued by `self` stay valid.
    pub fn merge(&mut self, mut other: Self) {
        let Some(other_min) = other.min else {
            return;
        };

        let mut moved: SecondaryMap<NodeKey, NodeKey> =
            SecondaryMap::with_capacity(other.nodes.len());
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            moved.insert(old, new);
        }
        for &new in moved.values() {
            let node = &mut self.nodes[new];
            node.link = Link {
                next: moved[node.link.next],
                prev: moved[node.link.prev],
            };
            node.parent = node.parent.map(|p| moved[p]);
            node.child = node.child.map(|c| moved[c]);
        }
        debug!("merged {} nodes into heap {:?}", moved.len(), self.id);

        let other_min = moved[other_min];
        match self.min {
            None => self.min = Some(other_min),
            Some(min) => {
                ring::splice(&mut self.nodes, Some(min), Some(other_min));
                if self.nodes[other_min].priority < self.nodes[min].priority {
                    self.min = Some(other_min);
                }
            }
        }
        self.debug_verify();
    }

    /// Returns true if `handle` refers to an element currently in this heap.
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns the priority and item behind `handle`, if it is still queued.
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        let key = self.resolve(handle).ok()?;
        let node = &self.nodes[key];
        Some((&node.priority, &node.item))
    }

    /// Iterates the root ring, starting at the minimum.
    pub fn roots(&self) -> Ring<'_, T, P> {
        let keys = match self.min {
            Some(min) => ring::iter(&self.nodes, min),
            None => ring::Keys::empty(&self.nodes),
        };
        Ring {
            nodes: &self.nodes,
            keys,
        }
    }

    /// Calls `visitor` once for every root, starting at the minimum.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&P, &T),
    {
        self.roots().for_each(|(priority, item)| visitor(priority, item));
    }

    /// Iterates the ring that contains `handle`'s node, starting at that node.
    ///
    /// For a root this is the root ring; otherwise it is the child ring of
    /// the node's parent.
    pub fn siblings(&self, handle: &FibonacciHandle) -> Result<Ring<'_, T, P>, HeapError> {
        let key = self.resolve(handle)?;
        Ok(Ring {
            nodes: &self.nodes,
            keys: ring::iter(&self.nodes, key),
        })
    }

    /// Iterates the immediate children of `handle`'s node.
    pub fn children(&self, handle: &FibonacciHandle) -> Result<Ring<'_, T, P>, HeapError> {
        let key = self.resolve(handle)?;
        let keys = match self.nodes[key].child {
            Some(child) => ring::iter(&self.nodes, child),
            None => ring::Keys::empty(&self.nodes),
        };
        Ok(Ring {
            nodes: &self.nodes,
            keys,
        })
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.nodes.contains_key(handle.key) {
            Ok(handle.key)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Splices a singleton node into the root ring and updates the minimum.
    fn add_root(&mut self, key: NodeKey) {
        match self.min {
            None => self.min = Some(key),
            Some(min) => {
                ring::insert_after(&mut self.nodes, min, key);
                if self.nodes[key].priority < self.nodes[min].priority {
                    self.min = Some(key);
                }
            }
        }
    }

    /// Merges the ring starting at `start` into at most one tree per degree and
    /// rebuilds the root ring from the survivors.
    fn consolidate(&mut self, start: NodeKey) {
        let roots: SmallVec<[NodeKey; 32]> = ring::iter(&self.nodes, start).collect();
        let max_degree = roots
            .iter()
            .map(|&root| self.nodes[root].degree)
            .max()
            .unwrap_or(0);

        // Linking n trees can raise the top degree by at most log2(n) < n.
        let mut buckets: SmallVec<[Option<NodeKey>; 64]> =
            smallvec![None; roots.len() + max_degree];

        for &root in &roots {
            ring::make_circular(&mut self.nodes, root);
            let node = &mut self.nodes[root];
            node.parent = None;
            node.marked = false;

            let mut tree = root;
            loop {
                let degree = self.nodes[tree].degree;
                match buckets[degree].take() {
                    None => {
                        buckets[degree] = Some(tree);
                        break;
                    }
                    Some(other) => tree = self.link(tree, other),
                }
            }
        }

        self.min = None;
        let mut trees = 0;
        for tree in buckets.into_iter().flatten() {
            self.add_root(tree);
            trees += 1;
        }
        trace!("consolidated {} roots into {} trees", roots.len(), trees);
    }

    /// Makes the root with the larger priority a child of the other one and
    /// returns the new parent. Both must be singleton rings.
    fn link(&mut self, a: NodeKey, b: NodeKey) -> NodeKey {
        let (parent, child) = if self.nodes[b].priority < self.nodes[a].priority {
            (b, a)
        } else {
            (a, b)
        };

        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        let first = self.nodes[parent].child;
        match first {
            Some(first) => ring::insert_after(&mut self.nodes, first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
        parent
    }

    /// Moves `key` out of `parent`'s child ring into the root ring.
    fn cut(&mut self, key: NodeKey, parent: NodeKey) {
        let remaining = ring::remove(&mut self.nodes, key);

        let p = &mut self.nodes[parent];
        if p.child == Some(key) {
            p.child = remaining;
        }
        p.degree -= 1;

        let node = &mut self.nodes[key];
        node.parent = None;
        node.marked = false;

        self.add_root(key);
    }

    /// Walks up from `key`: marked non-roots are cut, the first unmarked
    /// non-root is marked, and a root ends the walk untouched.
    fn cascading_cut(&mut self, mut key: NodeKey) {
        let mut cuts = 0usize;
        loop {
            let Some(parent) = self.nodes[key].parent else {
                break;
            };
            if !self.nodes[key].marked {
                self.nodes[key].marked = true;
                break;
            }
            self.cut(key, parent);
            cuts += 1;
            key = parent;
        }
        if cuts > 0 {
            trace!("cascading cut promoted {} ancestors", cuts);
        }
    }

    #[cfg(feature = "check-invariants")]
    fn debug_verify(&self) {
        if let Err(violation) = self.verify_invariants() {
            panic!("heap invariant violated: {violation}");
        }
    }

    #[cfg(not(feature = "check-invariants"))]
    #[inline(always)]
    fn debug_verify(&self) {}
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.find_min().ok()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min().ok()
    }

    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other)
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }
}

/// Iterator over one ring of a [`FibonacciHeap`], yielding `(priority, item)`.
///
/// Visits every member once and cannot be restarted; ask the heap for a new
/// one instead.
pub struct Ring<'a, T, P> {
    nodes: &'a SlotMap<NodeKey, Node<T, P>>,
    keys: ring::Keys<'a, Node<T, P>>,
}

impl<'a, T, P> Iterator for Ring<'a, T, P> {
    type Item = (&'a P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.keys.next().map(|key| {
            let node = &nodes[key];
            (&node.priority, &node.item)
        })
    }
}

impl<T, P> FusedIterator for Ring<'_, T, P> {}
