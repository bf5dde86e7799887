//! Shortest-path and spanning-tree algorithms driven by `decrease_key`
//!
//! These are the workloads a Fibonacci heap exists for: every time a shorter
//! route (or a cheaper edge) to a queued vertex is found, its priority is
//! lowered in place instead of pushing a duplicate entry.
//!
//! All functions are generic over [`DecreaseKeyHeap`], so the heap is picked by
//! the caller:
//!
//! - [`dijkstra`] / [`astar`]: goal-directed search over an implicit graph
//!   described by [`SearchNode`]
//! - [`shortest_distances`]: single-source distances over an adjacency list
//! - [`minimum_spanning_forest`]: Prim's algorithm over an undirected
//!   adjacency list
//!
//! Only lightweight indices go into the heap. A fast hash map (FxHash) maps
//! search states to their index.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//! use rust_fibonacci_heap::pathfinding::shortest_distances;
//!
//! // 0 -> 1 (4), 0 -> 2 (1), 2 -> 1 (2)
//! let graph = vec![vec![(1, 4), (2, 1)], vec![], vec![(1, 2)]];
//! let dist = shortest_distances::<u32, FibonacciHeap<_, _>>(&graph, 0);
//! assert_eq!(dist, vec![Some(0), Some(3), Some(1)]);
//! ```

use crate::traits::DecreaseKeyHeap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Costs usable as path lengths and edge weights.
///
/// `Default` must be the additive zero.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// A state in an implicit search graph.
pub trait SearchNode: Clone + Eq + Hash {
    /// Edge weight type
    type Cost: Cost;

    /// All neighbours together with the cost of the edge leading to them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// True if the search may stop at this state.
    fn is_goal(&self) -> bool;
}

/// A search state with an admissible estimate of its remaining cost.
pub trait AStarNode: SearchNode {
    /// Must never overestimate the true cost to the nearest goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Heap priority for graph search: ordered by `f_score` only.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// g + h (h is zero for Dijkstra)
    pub f_score: C,
    /// Cost from the start
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

type NodeIndex = usize;

struct NodeEntry<N: SearchNode, H> {
    node: N,
    g_score: N::Cost,
    /// Present while the node sits in the open set
    handle: Option<H>,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Open/closed bookkeeping for one search.
struct SearchState<N: SearchNode, H> {
    entries: Vec<NodeEntry<N, H>>,
    index_of: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, H> SearchState<N, H> {
    fn new() -> Self {
        SearchState {
            entries: Vec::new(),
            index_of: FxHashMap::default(),
        }
    }

    /// Returns the node's index and whether it was seen for the first time.
    fn index_for(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.index_of.get(&node) {
            return (index, false);
        }
        let index = self.entries.len();
        self.index_of.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            g_score,
            handle: None,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    fn path_to(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(previous) = self.entries[current].came_from {
            path.push(self.entries[previous].node.clone());
            current = previous;
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until a node reports `is_goal()`.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
///
/// # Example
/// ```rust
/// use rust_fibonacci_heap::pathfinding::{SearchNode, dijkstra};
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Node {
///     value: i32,
///     goal: i32,
/// }
///
/// impl SearchNode for Node {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         if self.value < 100 {
///             vec![(Node { value: self.value + 1, goal: self.goal }, 1)]
///         } else {
///             vec![]
///         }
///     }
///
///     fn is_goal(&self) -> bool {
///         self.value == self.goal
///     }
/// }
///
/// let start = Node { value: 0, goal: 5 };
/// let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
/// assert_eq!(cost, 5);
/// assert_eq!(path.len(), 6);
/// ```
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search::<N, H>(start, |_| N::Cost::default())
}

/// Runs A* from `start`, guided by [`AStarNode::heuristic`].
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search::<N, H>(start, |node| node.heuristic())
}

fn search<N, H>(start: &N, heuristic: impl Fn(&N) -> N::Cost) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut heap = H::new();
    let mut state: SearchState<N, H::Handle> = SearchState::new();

    let zero = N::Cost::default();
    let (start_index, _) = state.index_for(start.clone(), zero);
    let priority = PriorityCost {
        f_score: heuristic(start),
        g_score: zero,
    };
    state.entries[start_index].handle = Some(heap.push_with_handle(priority, start_index));

    while let Some((priority, current)) = heap.pop() {
        let entry = &mut state.entries[current];
        if entry.closed {
            continue;
        }
        entry.closed = true;
        entry.handle = None;

        let current_node = entry.node.clone();
        let current_g = priority.g_score;
        if current_node.is_goal() {
            return Some((state.path_to(current), current_g));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            let f_score = tentative_g + heuristic(&neighbor);
            let (index, is_new) = state.index_for(neighbor, tentative_g);
            let entry = &mut state.entries[index];
            if entry.closed || (!is_new && tentative_g >= entry.g_score) {
                continue;
            }

            entry.g_score = tentative_g;
            entry.came_from = Some(current);
            let priority = PriorityCost {
                f_score,
                g_score: tentative_g,
            };
            match &entry.handle {
                Some(handle) => {
                    // f only shrinks here: same node, same heuristic, smaller g.
                    let _ = heap.decrease_key(handle, priority);
                }
                None => entry.handle = Some(heap.push_with_handle(priority, index)),
            }
        }
    }

    None
}

/// Single-source shortest distances over a directed adjacency list.
///
/// `graph[v]` lists `(target, weight)` pairs. Entry `i` of the result is the
/// distance from `source` to `i`, or `None` if `i` is unreachable.
///
/// # Panics
/// Panics if `source` or any edge target is out of range.
pub fn shortest_distances<C, H>(graph: &[Vec<(usize, C)>], source: usize) -> Vec<Option<C>>
where
    C: Cost,
    H: DecreaseKeyHeap<usize, C>,
{
    let mut dist: Vec<Option<C>> = vec![None; graph.len()];
    let mut handles: Vec<Option<H::Handle>> = vec![None; graph.len()];
    let mut done = vec![false; graph.len()];
    let mut heap = H::new();

    dist[source] = Some(C::default());
    handles[source] = Some(heap.push_with_handle(C::default(), source));

    while let Some((d, v)) = heap.pop() {
        done[v] = true;
        handles[v] = None;
        for &(u, weight) in &graph[v] {
            if done[u] {
                continue;
            }
            let candidate = d + weight;
            match (&handles[u], dist[u]) {
                (Some(handle), Some(current)) if candidate < current => {
                    dist[u] = Some(candidate);
                    let _ = heap.decrease_key(handle, candidate);
                }
                (None, _) => {
                    dist[u] = Some(candidate);
                    handles[u] = Some(heap.push_with_handle(candidate, u));
                }
                _ => {}
            }
        }
    }

    dist
}

/// An edge chosen for a spanning forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<C> {
    pub from: usize,
    pub to: usize,
    pub weight: C,
}

/// Result of [`minimum_spanning_forest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest<C> {
    /// Chosen edges, in the order Prim's algorithm added them
    pub edges: Vec<Edge<C>>,
    /// Sum of all edge weights
    pub total_weight: C,
    /// Number of connected components
    pub components: usize,
}

/// Minimum spanning forest of an undirected graph, using Prim's algorithm.
///
/// `graph[v]` lists `(neighbour, weight)` pairs; every undirected edge should
/// appear in both endpoints' lists. Disconnected graphs yield one tree per
/// component.
///
/// # Panics
/// Panics if an edge target is out of range.
pub fn minimum_spanning_forest<C, H>(graph: &[Vec<(usize, C)>]) -> SpanningForest<C>
where
    C: Cost,
    H: DecreaseKeyHeap<usize, C>,
{
    let n = graph.len();
    let mut in_tree = vec![false; n];
    // Cheapest known edge into each vertex: (weight, from)
    let mut best: Vec<Option<(C, usize)>> = vec![None; n];
    let mut handles: Vec<Option<H::Handle>> = vec![None; n];
    let mut forest = SpanningForest {
        edges: Vec::new(),
        total_weight: C::default(),
        components: 0,
    };

    for root in 0..n {
        if in_tree[root] {
            continue;
        }
        forest.components += 1;

        let mut heap = H::new();
        handles[root] = Some(heap.push_with_handle(C::default(), root));

        while let Some((_, v)) = heap.pop() {
            in_tree[v] = true;
            handles[v] = None;
            if let Some((weight, from)) = best[v] {
                forest.edges.push(Edge {
                    from,
                    to: v,
                    weight,
                });
                forest.total_weight = forest.total_weight + weight;
            }

            for &(u, weight) in &graph[v] {
                if in_tree[u] {
                    continue;
                }
                match (&handles[u], best[u]) {
                    (Some(handle), Some((current, _))) if weight < current => {
                        best[u] = Some((weight, v));
                        let _ = heap.decrease_key(handle, weight);
                    }
                    (None, _) => {
                        best[u] = Some((weight, v));
                        handles[u] = Some(heap.push_with_handle(weight, u));
                    }
                    _ => {}
                }
            }
        }
    }

    forest
}
