/// Reachability queries over a [`CycleGraph`] restricted by a node filter.
///
/// The search engine never copies the graph to restrict it. Instead, every
/// query takes a [`NodeFilter`] naming the nodes that must not be entered,
/// typically a [`BlockedView`]. The query root is always admitted even if
/// the filter excludes it; every other excluded node is invisible.
///
/// [`BfsOracle`] answers all queries with breadth-first search over reusable
/// scratch buffers, so repeated queries during one run do not allocate
/// per-node tables.
use std::collections::VecDeque;

use crate::graph::{BlockedView, CycleGraph};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Chooses which endpoint of a witness query is the search root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Search outward from `start`; the path is returned `start` first.
    #[default]
    Forward,
    /// Search outward from `target`; the path is returned `target` first.
    Backward,
}

// ---------------------------------------------------------------------------
// NodeFilter
// ---------------------------------------------------------------------------

/// Decides which nodes a traversal must skip.
pub trait NodeFilter {
    /// Returns `true` if `node` must not be entered.
    fn excludes(&self, node: usize) -> bool;
}

impl NodeFilter for BlockedView {
    fn excludes(&self, node: usize) -> bool {
        !self.is_active(node)
    }
}

impl NodeFilter for [bool] {
    fn excludes(&self, node: usize) -> bool {
        self.get(node).copied().unwrap_or(false)
    }
}

/// A filter that admits every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unfiltered;

impl NodeFilter for Unfiltered {
    fn excludes(&self, _node: usize) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// ReachabilityOracle
// ---------------------------------------------------------------------------

/// Path-existence, witness, and flood-fill queries in a filtered graph.
pub trait ReachabilityOracle {
    /// Returns `true` if `target` can be reached from `start` without
    /// entering a filtered node.
    fn is_reachable<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
        target: usize,
    ) -> bool;

    /// Returns a shortest path between `start` and `target`, both inclusive,
    /// ordered according to `direction`. Empty if no path exists.
    fn shortest_witness_path<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
        target: usize,
        direction: Direction,
    ) -> Vec<usize>;

    /// Returns a `node_bound`-sized table with `true` for every node
    /// reachable from `start`, `start` included.
    fn reachability_mask<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
    ) -> Vec<bool>;

    /// Returns every node reachable from `start` in BFS order, `start` first.
    fn reachable_nodes<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
    ) -> Vec<usize>;

    /// Number of adjacency scans performed so far. Observability only.
    fn neighbor_queries(&self) -> u64 {
        0
    }
}

// ---------------------------------------------------------------------------
// BfsOracle
// ---------------------------------------------------------------------------

const NO_PREDECESSOR: usize = usize::MAX;

/// Breadth-first [`ReachabilityOracle`] with reusable scratch space.
///
/// Visited state is an epoch-stamped array: starting a query bumps the epoch
/// instead of clearing the array.
#[derive(Debug, Clone, Default)]
pub struct BfsOracle {
    stamp: Vec<u32>,
    epoch: u32,
    predecessor: Vec<usize>,
    queue: VecDeque<usize>,
    visited: Vec<usize>,
    neighbor_queries: u64,
}

impl BfsOracle {
    /// Creates an oracle with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle with scratch buffers sized for `graph`.
    pub fn for_graph(graph: &CycleGraph) -> Self {
        let mut oracle = Self::new();
        oracle.begin(graph.node_bound());
        oracle
    }

    fn begin(&mut self, bound: usize) {
        if self.stamp.len() < bound {
            self.stamp.resize(bound, 0);
            self.predecessor.resize(bound, NO_PREDECESSOR);
        }
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.stamp.fill(0);
            self.epoch = 1;
        }
        self.queue.clear();
        self.visited.clear();
    }

    fn seen(&self, node: usize) -> bool {
        self.stamp[node] == self.epoch
    }

    fn visit(&mut self, node: usize, from: usize) {
        self.stamp[node] = self.epoch;
        self.predecessor[node] = from;
        self.visited.push(node);
    }

    /// Runs BFS from `root`, stopping early once `goal` is visited.
    ///
    /// Returns `true` if `goal` was reached. With `goal == None` the whole
    /// component is explored and `false` is returned.
    fn explore<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        root: usize,
        goal: Option<usize>,
    ) -> bool {
        self.begin(graph.node_bound());
        if !graph.contains_node(root) {
            return false;
        }
        self.visit(root, NO_PREDECESSOR);
        if goal == Some(root) {
            return true;
        }
        self.queue.push_back(root);

        while let Some(current) = self.queue.pop_front() {
            self.neighbor_queries += 1;
            for neighbor in graph.neighbors(current) {
                if self.seen(neighbor) || filter.excludes(neighbor) {
                    continue;
                }
                self.visit(neighbor, current);
                if goal == Some(neighbor) {
                    return true;
                }
                self.queue.push_back(neighbor);
            }
        }
        false
    }

    /// Walks predecessors from `end` back to the root of the last search.
    fn trace_back(&self, end: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = end;
        loop {
            path.push(current);
            match self.predecessor[current] {
                NO_PREDECESSOR => break,
                prev => current = prev,
            }
        }
        path
    }
}

impl ReachabilityOracle for BfsOracle {
    fn is_reachable<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
        target: usize,
    ) -> bool {
        self.explore(graph, filter, start, Some(target))
    }

    fn shortest_witness_path<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
        target: usize,
        direction: Direction,
    ) -> Vec<usize> {
        let (root, goal) = match direction {
            Direction::Forward => (start, target),
            Direction::Backward => (target, start),
        };
        if !self.explore(graph, filter, root, Some(goal)) {
            return Vec::new();
        }
        // trace_back yields goal..root; callers want root first.
        let mut path = self.trace_back(goal);
        path.reverse();
        path
    }

    fn reachability_mask<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
    ) -> Vec<bool> {
        self.explore(graph, filter, start, None);
        let mut mask = vec![false; graph.node_bound()];
        for &node in &self.visited {
            mask[node] = true;
        }
        mask
    }

    fn reachable_nodes<F: NodeFilter + ?Sized>(
        &mut self,
        graph: &CycleGraph,
        filter: &F,
        start: usize,
    ) -> Vec<usize> {
        self.explore(graph, filter, start, None);
        self.visited.clone()
    }

    fn neighbor_queries(&self) -> u64 {
        self.neighbor_queries
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    /// 0 - 1 - 2 - 3 with a detour 0 - 4 - 5 - 3 and an isolated node 6.
    fn ladder() -> CycleGraph {
        CycleGraph::from_edges(7, [(0, 1), (1, 2), (2, 3), (0, 4), (4, 5), (5, 3)])
            .expect("valid edges")
    }

    #[test]
    fn test_witness_is_shortest() {
        let g = ladder();
        let mut oracle = BfsOracle::new();
        let path = oracle.shortest_witness_path(&g, &Unfiltered, 0, 2, Direction::Forward);
        assert_eq!(path, vec![0, 1, 2]);
    }

    #[test]
    fn test_witness_avoids_blocked_nodes() {
        let g = ladder();
        let mut view = BlockedView::for_graph(&g);
        view.block(1);
        let mut oracle = BfsOracle::new();
        let path = oracle.shortest_witness_path(&g, &view, 0, 2, Direction::Forward);
        assert_eq!(path, vec![0, 4, 5, 3, 2]);
    }

    #[test]
    fn test_backward_witness_starts_at_target() {
        let g = ladder();
        let mut view = BlockedView::for_graph(&g);
        view.block(4);
        let mut oracle = BfsOracle::new();
        let path = oracle.shortest_witness_path(&g, &view, 0, 3, Direction::Backward);
        assert_eq!(path, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_unreachable_returns_empty() {
        let g = ladder();
        let mut oracle = BfsOracle::new();
        assert!(
            oracle
                .shortest_witness_path(&g, &Unfiltered, 0, 6, Direction::Forward)
                .is_empty()
        );
        assert!(!oracle.is_reachable(&g, &Unfiltered, 0, 6));
    }

    #[test]
    fn test_blocked_start_is_admitted_blocked_target_is_not() {
        let g = ladder();
        let mut view = BlockedView::for_graph(&g);
        view.block(0);
        view.block(3);
        let mut oracle = BfsOracle::new();
        assert!(oracle.is_reachable(&g, &view, 0, 2));
        assert!(!oracle.is_reachable(&g, &view, 2, 3));
        assert!(oracle.is_reachable(&g, &view, 3, 3));
    }

    #[test]
    fn test_mask_and_nodes_include_start() {
        let g = ladder();
        let mut view = BlockedView::for_graph(&g);
        view.block(1);
        view.block(5);
        let mut oracle = BfsOracle::new();
        let mask = oracle.reachability_mask(&g, &view, 0);
        assert_eq!(mask, vec![true, false, false, false, true, false, false]);
        let mut nodes = oracle.reachable_nodes(&g, &view, 2);
        nodes.sort_unstable();
        assert_eq!(nodes, vec![2, 3]);
    }

    #[test]
    fn test_bool_slice_filter() {
        let g = ladder();
        let excluded = [false, false, true, false, false, false, false];
        let mut oracle = BfsOracle::new();
        let nodes = oracle.reachable_nodes(&g, &excluded[..], 1);
        assert_eq!(nodes.len(), 5);
        assert!(!nodes.contains(&2));
    }

    #[test]
    fn test_neighbor_queries_accumulate() {
        let g = ladder();
        let mut oracle = BfsOracle::for_graph(&g);
        assert_eq!(oracle.neighbor_queries(), 0);
        oracle.reachable_nodes(&g, &Unfiltered, 0);
        assert_eq!(oracle.neighbor_queries(), 6);
    }

    #[test]
    fn test_scratch_reuse_across_many_queries() {
        let g = ladder();
        let mut oracle = BfsOracle::new();
        for _ in 0..1_000 {
            assert!(oracle.is_reachable(&g, &Unfiltered, 6, 6));
            assert!(oracle.is_reachable(&g, &Unfiltered, 1, 5));
        }
    }
}
