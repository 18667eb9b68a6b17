//! Dijkstra's and A* pathfinding on top of [`DaryHeap`]
//!
//! The open set is a `DaryHeap` keyed by a lightweight node index. When a
//! cheaper route to an open node is found, its entry is re-prioritized in
//! place with [`DaryHeap::increase_priority`] instead of being pushed again,
//! so every node appears in the heap at most once.
//!
//! Node states live in a side table (`Vec` plus an FxHash lookup), which keeps
//! heap swaps cheap regardless of how large the node type is.
//!
//! Dijkstra is A* with h(n) = 0.
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::pathfinding::{SearchNode, dijkstra};
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, y: self.y, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x - 1, y: self.y, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x, y: self.y + 1, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x, y: self.y - 1, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let (path, cost) = dijkstra(&start, 4).unwrap().unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::dary::DaryHeap;
use crate::error::HeapError;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// Costs must be non-negative in practice: Dijkstra and A* never reopen a
/// node once it has been popped.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to decide
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be admissible and consistent (never overestimate, and
/// never drop by more than an edge's cost) for A* to find optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Heap priority for a node in the open set.
///
/// Lower f-scores come out first. Among equal f-scores the entry with the
/// larger g-score wins, so the search keeps extending its deepest frontier
/// instead of fanning out across a plateau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityCost<C> {
    /// g + h, with h = 0 for Dijkstra
    pub f_score: C,
    /// Cost of the best known route from the start
    pub g_score: C,
}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| other.g_score.cmp(&self.g_score))
    }
}

type NodeIndex = usize;

/// Search result: the path from start to goal (inclusive) and its cost.
pub type PathResult<N> = (Vec<N>, <N as SearchNode>::Cost);

struct NodeEntry<N: SearchNode> {
    node: N,
    g_score: N::Cost,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Open set plus per-node bookkeeping for one search.
struct PathFinder<N: SearchNode> {
    open: DaryHeap<NodeIndex, PriorityCost<N::Cost>>,
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new(arity: usize, start: &N, start_h: N::Cost) -> Result<Self, HeapError> {
        let mut finder = PathFinder {
            open: DaryHeap::new(arity)?,
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        };
        let zero = N::Cost::default();
        let (index, _) = finder.get_or_create_index(start.clone(), zero);
        finder.open.insert(
            index,
            PriorityCost {
                f_score: start_h,
                g_score: zero,
            },
        )?;
        Ok(finder)
    }

    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            (index, false)
        } else {
            let index = self.nodes.len();
            self.state_to_index.insert(node.clone(), index);
            self.nodes.push(NodeEntry {
                node,
                g_score,
                came_from: None,
                closed: false,
            });
            (index, true)
        }
    }

    /// Pops the next open node and closes it, returning its index and g-score.
    fn next_open(&mut self) -> Option<(NodeIndex, N::Cost)> {
        let (index, priority) = self.open.pop().ok()?;
        self.nodes[index].closed = true;
        Some((index, priority.g_score))
    }

    /// Records a route to `neighbor` through `from` if it is new or cheaper.
    fn relax(
        &mut self,
        from: NodeIndex,
        neighbor: N,
        tentative_g: N::Cost,
        h: N::Cost,
    ) -> Result<(), HeapError> {
        let (index, is_new) = self.get_or_create_index(neighbor, tentative_g);
        let entry = &mut self.nodes[index];
        if entry.closed || (!is_new && tentative_g >= entry.g_score) {
            return Ok(());
        }
        entry.g_score = tentative_g;
        entry.came_from = Some(from);

        let priority = PriorityCost {
            f_score: tentative_g + h,
            g_score: tentative_g,
        };
        if is_new {
            self.open.insert(index, priority)
        } else {
            self.open.increase_priority(&index, priority)
        }
    }

    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.nodes[current].node.clone()];
        while let Some(prev) = self.nodes[current].came_from {
            path.push(self.nodes[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until `is_goal()` returns true.
///
/// `arity` is the branching factor of the open-set heap.
///
/// # Returns
/// - `Ok(Some((path, cost)))` if a path is found
/// - `Ok(None)` if no path exists
///
/// # Errors
/// Returns `HeapError::InvalidArity` if `arity < 2`.
///
/// # Example
/// ```rust
/// use indexed_dary_heap::pathfinding::{SearchNode, dijkstra};
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
/// let (path, cost) = dijkstra(&start, 2).unwrap().unwrap();
/// assert_eq!(cost, 5);
/// assert_eq!(path.len(), 6);
/// ```
pub fn dijkstra<N: SearchNode>(start: &N, arity: usize) -> Result<Option<PathResult<N>>, HeapError> {
    PathFinderBuilder::new(start.clone()).arity(arity).dijkstra()
}

/// Runs A* search from `start` until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search.
///
/// # Errors
/// Returns `HeapError::InvalidArity` if `arity < 2`.
pub fn astar<N: AStarNode>(start: &N, arity: usize) -> Result<Option<PathResult<N>>, HeapError> {
    PathFinderBuilder::new(start.clone()).arity(arity).astar()
}

/// Builder for pathfinding queries with more configuration options.
///
/// The node type's `is_goal()` method determines when to stop.
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    arity: usize,
    max_cost: Option<N::Cost>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            arity: crate::arity::DEFAULT_ARITY,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Sets the branching factor of the open-set heap.
    pub fn arity(mut self, d: usize) -> Self {
        self.arity = d;
        self
    }

    /// Sets the maximum cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of nodes to explore.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured settings.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if the configured arity is below 2.
    pub fn dijkstra(self) -> Result<Option<PathResult<N>>, HeapError> {
        self.search_with_heuristic(|_| N::Cost::default())
    }

    /// Runs A* search with the configured settings.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if the configured arity is below 2.
    pub fn astar(self) -> Result<Option<PathResult<N>>, HeapError>
    where
        N: AStarNode,
    {
        self.search_with_heuristic(|n| n.heuristic())
    }

    fn search_with_heuristic(
        self,
        heuristic: impl Fn(&N) -> N::Cost,
    ) -> Result<Option<PathResult<N>>, HeapError> {
        let mut finder = PathFinder::new(self.arity, &self.start, heuristic(&self.start))?;
        let mut nodes_explored = 0usize;

        while let Some((current, current_g)) = finder.next_open() {
            if let Some(max) = self.max_nodes {
                if nodes_explored >= max {
                    trace!(nodes_explored, "search stopped at node limit");
                    return Ok(None);
                }
            }
            nodes_explored += 1;

            if finder.nodes[current].node.is_goal() {
                trace!(nodes_explored, "search reached goal");
                return Ok(Some((finder.reconstruct_path(current), current_g)));
            }

            let successors = finder.nodes[current].node.successors();
            for (neighbor, edge_cost) in successors {
                let tentative_g = current_g + edge_cost;
                if self.max_cost.is_some_and(|max| tentative_g > max) {
                    continue;
                }
                let h = heuristic(&neighbor);
                finder.relax(current, neighbor, tentative_g, h)?;
            }
        }

        trace!(nodes_explored, "search exhausted open set");
        Ok(None)
    }
}

/// Returns all nodes reachable from the start within a given cost budget.
///
/// Nodes are listed in the order they are settled, which is non-decreasing
/// cost order. The start node always comes first at the zero cost; every
/// other node is only queued once a route within `max_cost` reaches it.
///
/// # Errors
/// Returns `HeapError::InvalidArity` if `arity < 2`.
pub fn reachable_within<N: SearchNode>(
    start: &N,
    max_cost: N::Cost,
    arity: usize,
) -> Result<Vec<(N, N::Cost)>, HeapError> {
    let mut finder = PathFinder::new(arity, start, N::Cost::default())?;
    let mut result = Vec::new();

    while let Some((current, current_g)) = finder.next_open() {
        let current_node = finder.nodes[current].node.clone();

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if tentative_g > max_cost {
                continue;
            }
            finder.relax(current, neighbor, tentative_g, N::Cost::default())?;
        }
        result.push((current_node, current_g));
    }

    Ok(result)
}
