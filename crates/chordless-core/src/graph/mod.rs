/// Undirected graph storage for cycle enumeration, built on `petgraph`.
///
/// [`CycleGraph`] wraps a `StableUnGraph` so that node identifiers are dense
/// `usize` values that stay valid when nodes or edges are removed. The
/// enumerator mutates a private copy of the input graph between sweep steps,
/// so stable identifiers matter: a node retired from the sweep keeps its id
/// and every per-node table (blocked counts, marks, BFS scratch) can be sized
/// once from [`CycleGraph::node_bound`].
///
/// # Submodules
///
/// - [`blocked`]: the reference-counted exclusion layer used instead of
///   copying the graph at every recursion level.
/// - [`reach`]: the BFS-backed reachability oracle.
/// - [`bridges`]: bridge detection and pruning.
pub mod blocked;
pub mod bridges;
pub mod reach;

pub use blocked::{BlockScope, BlockedView};
pub use bridges::{bridges, prune_bridges};
pub use reach::{BfsOracle, Direction, NodeFilter, ReachabilityOracle};

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use thiserror::Error;

/// Errors that can occur while building a [`CycleGraph`] from an edge list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphBuildError {
    /// An edge connects a node to itself. Simple graphs have no self-loops.
    #[error("self-loop on node {0}")]
    SelfLoop(usize),
    /// An edge endpoint is not below the declared node count.
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange {
        /// The offending endpoint.
        node: usize,
        /// The declared number of nodes.
        node_count: usize,
    },
}

/// A simple undirected graph over dense integer node ids.
///
/// Parallel edges are collapsed on insertion and self-loops are rejected, so
/// the graph is always simple. Removing a node leaves a hole in the id space;
/// [`CycleGraph::nodes`] skips holes and [`CycleGraph::node_bound`] still
/// covers them.
#[derive(Debug, Clone, Default)]
pub struct CycleGraph {
    graph: StableUnGraph<(), ()>,
}

impl CycleGraph {
    /// Creates an edgeless graph with nodes `0..node_count`.
    pub fn with_nodes(node_count: usize) -> Self {
        let mut graph = StableUnGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Builds a graph with nodes `0..node_count` and the given edges.
    ///
    /// Duplicate edges (in either orientation) are inserted once.
    ///
    /// # Errors
    ///
    /// - [`GraphBuildError::NodeOutOfRange`] if an endpoint is `>= node_count`.
    /// - [`GraphBuildError::SelfLoop`] if an edge has equal endpoints.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphBuildError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::with_nodes(node_count);
        for (a, b) in edges {
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphBuildError::NodeOutOfRange { node, node_count });
                }
            }
            if a == b {
                return Err(GraphBuildError::SelfLoop(a));
            }
            graph.add_edge(a, b);
        }
        Ok(graph)
    }

    /// Returns a copy of this graph with the same node ids and no edges.
    pub fn without_edges(&self) -> Self {
        let mut graph = self.graph.clone();
        graph.clear_edges();
        Self { graph }
    }

    /// Returns the number of nodes currently in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns one past the largest node id ever allocated.
    ///
    /// Per-node tables indexed by node id must have at least this length.
    pub fn node_bound(&self) -> usize {
        self.graph.node_bound()
    }

    /// Returns `true` if `node` is a present (not removed) node.
    pub fn contains_node(&self, node: usize) -> bool {
        node < self.node_bound() && self.graph.contains_node(NodeIndex::new(node))
    }

    /// Iterates over all present node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.graph.node_indices().map(|idx| idx.index())
    }

    /// Iterates over the neighbors of `node`.
    ///
    /// Yields nothing for a removed or never-allocated node.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        // Ids past the bound would wrap to a live node inside `NodeIndex`.
        self.contains_node(node)
            .then(|| self.graph.neighbors(NodeIndex::new(node)))
            .into_iter()
            .flatten()
            .map(|idx| idx.index())
    }

    /// Returns the number of edges incident to `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    /// Returns `true` if an edge joins `a` and `b`.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.contains_node(a)
            && self.contains_node(b)
            && self
                .graph
                .find_edge(NodeIndex::new(a), NodeIndex::new(b))
                .is_some()
    }

    /// Iterates over all edges as `(low, high)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.edge_references().map(|edge| {
            let a = edge.source().index();
            let b = edge.target().index();
            (a.min(b), a.max(b))
        })
    }

    /// Inserts an edge between `a` and `b`.
    ///
    /// Returns `false` without changing the graph if the edge already exists,
    /// if `a == b`, or if either endpoint is not present.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b || !self.contains_node(a) || !self.contains_node(b) || self.has_edge(a, b) {
            return false;
        }
        self.graph
            .add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        true
    }

    /// Removes the edge between `a` and `b`. Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> bool {
        if !self.has_edge(a, b) {
            return false;
        }
        match self.graph.find_edge(NodeIndex::new(a), NodeIndex::new(b)) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    /// Removes `node` and every edge incident to it.
    ///
    /// The id is not reused. Returns `false` if the node was not present.
    pub fn remove_node(&mut self, node: usize) -> bool {
        if !self.contains_node(node) {
            return false;
        }
        self.graph.remove_node(NodeIndex::new(node)).is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn square_with_diagonal() -> CycleGraph {
        CycleGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)])
            .expect("valid edges")
    }

    #[test]
    fn test_with_nodes_is_edgeless() {
        let g = CycleGraph::with_nodes(5);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_from_edges_collapses_duplicates() {
        let g = CycleGraph::from_edges(3, [(0, 1), (1, 0), (0, 1), (1, 2)]).expect("valid");
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(1, 0));
        assert!(g.has_edge(2, 1));
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn test_from_edges_rejects_self_loop() {
        let err = CycleGraph::from_edges(3, [(0, 1), (2, 2)]).expect_err("self-loop");
        assert_eq!(err, GraphBuildError::SelfLoop(2));
    }

    #[test]
    fn test_from_edges_rejects_out_of_range() {
        let err = CycleGraph::from_edges(3, [(0, 3)]).expect_err("out of range");
        assert_eq!(
            err,
            GraphBuildError::NodeOutOfRange {
                node: 3,
                node_count: 3
            }
        );
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_degree_and_neighbors() {
        let g = square_with_diagonal();
        assert_eq!(g.degree(0), 3);
        assert_eq!(g.degree(1), 2);
        let mut n: Vec<usize> = g.neighbors(2).collect();
        n.sort_unstable();
        assert_eq!(n, vec![0, 1, 3]);
    }

    #[test]
    fn test_add_edge_is_idempotent() {
        let mut g = CycleGraph::with_nodes(3);
        assert!(g.add_edge(0, 1));
        assert!(!g.add_edge(1, 0));
        assert!(!g.add_edge(2, 2));
        assert!(!g.add_edge(0, 9));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = square_with_diagonal();
        assert!(g.remove_edge(2, 0));
        assert!(!g.remove_edge(0, 2));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_remove_node_keeps_ids_stable() {
        let mut g = square_with_diagonal();
        assert!(g.remove_node(1));
        assert!(!g.remove_node(1));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.node_bound(), 4);
        assert!(!g.contains_node(1));
        assert_eq!(g.neighbors(1).count(), 0);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![0, 2, 3]);
        assert!(g.has_edge(2, 3));
    }

    #[test]
    fn test_without_edges_keeps_nodes() {
        let g = square_with_diagonal();
        let bare = g.without_edges();
        assert_eq!(bare.node_count(), 4);
        assert_eq!(bare.edge_count(), 0);
        assert_eq!(bare.node_bound(), g.node_bound());
    }

    #[test]
    fn test_edges_are_normalized() {
        let g = CycleGraph::from_edges(3, [(2, 0), (1, 2)]).expect("valid");
        let mut edges: Vec<_> = g.edges().collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_ids_past_u32_do_not_alias_live_nodes() {
        let mut g = square_with_diagonal();
        // 2^32 + 2 truncates to node 2 inside petgraph's u32 index.
        let wide = (1usize << 32) + 2;
        assert!(!g.contains_node(wide));
        assert_eq!(g.neighbors(wide).count(), 0);
        assert_eq!(g.degree(wide), 0);
        assert!(!g.has_edge(0, wide));
        assert!(!g.add_edge(1, wide));
        assert!(!g.remove_edge(wide, 0));
        assert!(!g.remove_node(wide));
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.node_count(), 4);
    }
}
