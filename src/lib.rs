//! Fibonacci heap priority queue for Rust
//!
//! This crate provides an arena-backed Fibonacci heap with efficient `decrease_key`
//! support, plus the graph algorithms that motivate it.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert, find_min and decrease_key;
//!   O(log n) amortized extract_min
//! - **Generational handles**: stale handles and handles from another heap are
//!   rejected instead of corrupting the structure
//! - **Graph algorithms**: Dijkstra, A*, single-source distances and Prim's
//!   minimum spanning forest, generic over any [`DecreaseKeyHeap`]
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//! use rust_fibonacci_heap::HeapError;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Ok((&1, &"item1")));
//! assert_eq!(heap.decrease_key(&handle1, 7), Err(HeapError::KeyOrderViolation));
//! ```
//!
//! # Cargo features
//!
//! - `check-invariants`: verify the whole forest after every mutating
//!   operation and panic on the first violation. Slow; meant for debugging.

pub mod fibonacci;
pub mod invariants;
pub mod pathfinding;
mod ring;
pub mod traits;

// Re-export the main traits for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use invariants::InvariantViolation;
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
