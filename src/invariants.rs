//! Structural verification for [`FibonacciHeap`].
//!
//! [`FibonacciHeap::verify_invariants`] walks every ring of the forest and
//! checks ring linkage, parent back-references, heap order, degrees, marks and
//! that the arena holds nothing unreachable. It is O(n) and meant for tests
//! and the `check-invariants` feature.

use crate::fibonacci::FibonacciHeap;
use crate::ring::NodeKey;
use rustc_hash::FxHashSet;
use std::fmt;

/// A broken structural invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A ring link points at a node that is not in the arena
    DanglingLink,
    /// `next.prev` does not lead back, or a ring never closes
    BrokenRing,
    /// A node's parent pointer disagrees with the ring it sits in
    ParentMismatch,
    /// A child has a smaller priority than its parent
    HeapOrder,
    /// A root has a smaller priority than the tracked minimum
    MinimumNotSmallest,
    /// A root carries the mark flag
    MarkedRoot,
    /// A node's degree differs from the size of its child ring
    DegreeMismatch { expected: usize, found: usize },
    /// The arena holds nodes that cannot be reached from the root ring
    UnreachableNodes { reachable: usize, stored: usize },
    /// Two roots share a degree after consolidation
    DuplicateRootDegree(usize),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::DanglingLink => write!(f, "link to a node outside the arena"),
            InvariantViolation::BrokenRing => write!(f, "ring links are inconsistent"),
            InvariantViolation::ParentMismatch => {
                write!(f, "parent pointer does not match the owning ring")
            }
            InvariantViolation::HeapOrder => write!(f, "child priority below its parent"),
            InvariantViolation::MinimumNotSmallest => {
                write!(f, "a root is smaller than the tracked minimum")
            }
            InvariantViolation::MarkedRoot => write!(f, "root node is marked"),
            InvariantViolation::DegreeMismatch { expected, found } => {
                write!(f, "degree is {expected} but child ring has {found} nodes")
            }
            InvariantViolation::UnreachableNodes { reachable, stored } => {
                write!(f, "{reachable} of {stored} nodes reachable from the roots")
            }
            InvariantViolation::DuplicateRootDegree(degree) => {
                write!(f, "more than one root of degree {degree}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Checks every structural invariant of the forest.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return match self.nodes.len() {
                0 => Ok(()),
                stored => Err(InvariantViolation::UnreachableNodes {
                    reachable: 0,
                    stored,
                }),
            };
        };
        let min_priority = &self
            .nodes
            .get(min)
            .ok_or(InvariantViolation::DanglingLink)?
            .priority;

        let mut reachable = 0usize;
        let mut pending: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];

        while let Some((start, owner)) = pending.pop() {
            let mut members = 0usize;
            let mut key = start;
            loop {
                let node = self.nodes.get(key).ok_or(InvariantViolation::DanglingLink)?;
                let next = self
                    .nodes
                    .get(node.link.next)
                    .ok_or(InvariantViolation::DanglingLink)?;
                if next.link.prev != key {
                    return Err(InvariantViolation::BrokenRing);
                }
                if node.parent != owner {
                    return Err(InvariantViolation::ParentMismatch);
                }
                match owner {
                    None => {
                        if node.marked {
                            return Err(InvariantViolation::MarkedRoot);
                        }
                        if node.priority < *min_priority {
                            return Err(InvariantViolation::MinimumNotSmallest);
                        }
                    }
                    Some(owner) => {
                        if node.priority < self.nodes[owner].priority {
                            return Err(InvariantViolation::HeapOrder);
                        }
                    }
                }
                if let Some(child) = node.child {
                    pending.push((child, Some(key)));
                }

                members += 1;
                reachable += 1;
                if reachable > self.nodes.len() {
                    return Err(InvariantViolation::BrokenRing);
                }

                key = node.link.next;
                if key == start {
                    break;
                }
            }

            if let Some(owner) = owner {
                let expected = self.nodes[owner].degree;
                if expected != members {
                    return Err(InvariantViolation::DegreeMismatch {
                        expected,
                        found: members,
                    });
                }
            }
        }

        // Leaf nodes must not claim children either.
        for (_, node) in &self.nodes {
            if node.child.is_none() && node.degree != 0 {
                return Err(InvariantViolation::DegreeMismatch {
                    expected: node.degree,
                    found: 0,
                });
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantViolation::UnreachableNodes {
                reachable,
                stored: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Checks that no two roots share a degree.
    ///
    /// This holds right after [`FibonacciHeap::extract_min`]; inserts and cuts
    /// are free to break it until the next extraction.
    pub fn check_consolidated(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return Ok(());
        };
        let mut degrees = FxHashSet::default();
        for key in crate::ring::iter(&self.nodes, min) {
            let degree = self.nodes[key].degree;
            if !degrees.insert(degree) {
                return Err(InvariantViolation::DuplicateRootDegree(degree));
            }
        }
        Ok(())
    }
}
