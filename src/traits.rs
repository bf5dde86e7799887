//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for heap/priority queue data structures:
//!
//! - [`Heap`]: Base trait with the `BinaryHeap`-like push/peek/pop surface plus merge
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key` and handle-based insertion
//!
//! The graph algorithms in [`crate::pathfinding`] are written against these traits,
//! so any heap offering handles can drive them.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapError {
    /// The operation needs at least one element
    EmptyHeap,
    /// The handle is stale (its element was extracted) or belongs to another heap
    InvalidHandle,
    /// `decrease_key` was given a priority larger than the current one
    KeyOrderViolation,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::InvalidHandle => {
                write!(f, "handle does not refer to an element of this heap")
            }
            HeapError::KeyOrderViolation => {
                write!(f, "new priority is greater than current priority")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
/// They are min-heaps.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::Heap;
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{DecreaseKeyHeap, Heap};
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by `handle`
    ///
    /// A priority equal to the current one is accepted and leaves the
    /// structure untouched.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the element was already popped or the
    ///   handle came from a different heap.
    /// - [`HeapError::KeyOrderViolation`] if `new_priority` is greater than the
    ///   current priority. The heap is not modified.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert!(HeapError::KeyOrderViolation
            .to_string()
            .contains("greater than current"));
        let boxed: Box<dyn std::error::Error> = Box::new(HeapError::InvalidHandle);
        assert!(boxed.to_string().contains("handle"));
    }
}
