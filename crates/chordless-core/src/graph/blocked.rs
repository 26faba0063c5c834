/// Reference-counted node exclusion over a [`CycleGraph`].
///
/// A [`BlockedView`] keeps one counter per node id. A node is *active* while
/// its counter is zero. The search raises counters on entry to a recursion
/// level and lowers them on exit, so "remove these nodes for now" costs
/// O(degree) instead of a graph copy.
///
/// Pairing is enforced with [`BlockScope`]: every `*_scoped` method returns a
/// guard that releases exactly what it acquired when dropped, including on
/// early return from the enclosing search branch.
use std::ops::{Deref, DerefMut};

use crate::graph::CycleGraph;

/// Per-node blocked counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedView {
    counts: Vec<u32>,
}

impl BlockedView {
    /// Creates a view with `bound` nodes, all active.
    pub fn new(bound: usize) -> Self {
        Self {
            counts: vec![0; bound],
        }
    }

    /// Creates a view sized for every id `graph` has allocated.
    pub fn for_graph(graph: &CycleGraph) -> Self {
        Self::new(graph.node_bound())
    }

    /// Returns the number of node slots covered by this view.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the view covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the current blocked count of `node`. Unknown ids report zero.
    pub fn count(&self, node: usize) -> u32 {
        self.counts.get(node).copied().unwrap_or(0)
    }

    /// Returns `true` if `node` is not blocked.
    pub fn is_active(&self, node: usize) -> bool {
        self.count(node) == 0
    }

    /// Returns `true` if every counter is zero.
    pub fn is_clear(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Increments the blocked count of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the view.
    pub fn block(&mut self, node: usize) {
        self.counts[node] += 1;
    }

    /// Decrements the blocked count of `node`.
    ///
    /// # Panics
    ///
    /// Panics if the count is already zero. An unmatched release means the
    /// block/unblock pairing is broken, which is a defect in the caller.
    pub fn unblock(&mut self, node: usize) {
        let count = &mut self.counts[node];
        assert!(*count > 0, "unblock of node {node} with a zero blocked count");
        *count -= 1;
    }

    /// Blocks every neighbor of `node` in `graph` except `exception`.
    pub fn block_neighbors_except(&mut self, graph: &CycleGraph, node: usize, exception: usize) {
        for neighbor in graph.neighbors(node) {
            if neighbor != exception {
                self.block(neighbor);
            }
        }
    }

    /// Exact inverse of [`BlockedView::block_neighbors_except`].
    ///
    /// The adjacency of `node` must not have changed between the two calls.
    pub fn unblock_neighbors_except(&mut self, graph: &CycleGraph, node: usize, exception: usize) {
        for neighbor in graph.neighbors(node) {
            if neighbor != exception {
                self.unblock(neighbor);
            }
        }
    }

    /// Blocks `node` until the returned guard is dropped.
    pub fn block_scoped(&mut self, node: usize) -> BlockScope<'_, 'static> {
        self.block(node);
        BlockScope {
            view: self,
            release: Release::Node(node),
        }
    }

    /// Blocks every neighbor of `node` except `exception` until the returned
    /// guard is dropped.
    pub fn block_neighbors_scoped<'v, 'g>(
        &'v mut self,
        graph: &'g CycleGraph,
        node: usize,
        exception: usize,
    ) -> BlockScope<'v, 'g> {
        self.block_neighbors_except(graph, node, exception);
        BlockScope {
            view: self,
            release: Release::NeighborsExcept {
                graph,
                node,
                exception,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// BlockScope
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Release<'g> {
    Node(usize),
    NeighborsExcept {
        graph: &'g CycleGraph,
        node: usize,
        exception: usize,
    },
}

/// Guard returned by [`BlockedView::block_scoped`] and
/// [`BlockedView::block_neighbors_scoped`].
///
/// Dereferences to the underlying [`BlockedView`], so nested scopes can be
/// opened on top of it. Dropping the guard undoes its own acquisition.
#[derive(Debug)]
pub struct BlockScope<'v, 'g> {
    view: &'v mut BlockedView,
    release: Release<'g>,
}

impl Deref for BlockScope<'_, '_> {
    type Target = BlockedView;

    fn deref(&self) -> &BlockedView {
        self.view
    }
}

impl DerefMut for BlockScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut BlockedView {
        self.view
    }
}

impl Drop for BlockScope<'_, '_> {
    fn drop(&mut self) {
        match self.release {
            Release::Node(node) => self.view.unblock(node),
            Release::NeighborsExcept {
                graph,
                node,
                exception,
            } => self.view.unblock_neighbors_except(graph, node, exception),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn star() -> CycleGraph {
        CycleGraph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]).expect("valid edges")
    }

    #[test]
    fn test_block_and_unblock_count() {
        let mut view = BlockedView::new(3);
        view.block(1);
        view.block(1);
        assert_eq!(view.count(1), 2);
        assert!(!view.is_active(1));
        view.unblock(1);
        assert!(!view.is_active(1));
        view.unblock(1);
        assert!(view.is_active(1));
        assert!(view.is_clear());
    }

    #[test]
    #[should_panic(expected = "zero blocked count")]
    fn test_unblock_below_zero_panics() {
        let mut view = BlockedView::new(2);
        view.unblock(0);
    }

    #[test]
    fn test_unknown_node_is_active() {
        let view = BlockedView::new(2);
        assert!(view.is_active(17));
        assert_eq!(view.count(17), 0);
    }

    #[test]
    fn test_block_neighbors_except() {
        let g = star();
        let mut view = BlockedView::for_graph(&g);
        view.block_neighbors_except(&g, 0, 3);
        assert!(view.is_active(0));
        assert!(view.is_active(3));
        assert!(!view.is_active(1));
        assert!(!view.is_active(2));
        assert!(!view.is_active(4));
        view.unblock_neighbors_except(&g, 0, 3);
        assert!(view.is_clear());
    }

    #[test]
    fn test_scopes_release_on_drop() {
        let g = star();
        let mut view = BlockedView::for_graph(&g);
        {
            let mut outer = view.block_scoped(0);
            assert!(!outer.is_active(0));
            {
                let inner = outer.block_neighbors_scoped(&g, 0, 1);
                assert!(!inner.is_active(2));
                assert!(inner.is_active(1));
                assert_eq!(inner.count(0), 1);
            }
            assert!(outer.is_active(2));
            assert!(!outer.is_active(0));
        }
        assert!(view.is_clear());
    }

    #[test]
    fn test_scopes_release_on_early_return() {
        fn branch(view: &mut BlockedView, bail: bool) -> bool {
            let scope = view.block_scoped(1);
            if bail {
                return scope.is_active(1);
            }
            true
        }
        let mut view = BlockedView::new(2);
        assert!(!branch(&mut view, true));
        assert!(branch(&mut view, false));
        assert!(view.is_clear());
    }
}
