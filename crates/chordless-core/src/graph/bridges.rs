/// Bridge detection and removal.
///
/// A bridge is an edge whose removal disconnects its component. No cycle
/// passes through a bridge, so dropping every bridge leaves the set of
/// chordless cycles unchanged while shrinking the graph the sweep has to
/// visit. Detection is the classic lowlink DFS, run with an explicit stack so
/// long paths cannot overflow the call stack.
use crate::graph::CycleGraph;

const UNVISITED: usize = usize::MAX;

struct Frame {
    node: usize,
    parent: usize,
    neighbors: Vec<usize>,
    next: usize,
}

/// Returns every bridge of `graph` as a `(low, high)` pair, sorted.
pub fn bridges(graph: &CycleGraph) -> Vec<(usize, usize)> {
    let bound = graph.node_bound();
    let mut discovery = vec![UNVISITED; bound];
    let mut low = vec![0usize; bound];
    let mut clock = 0usize;
    let mut found = Vec::new();

    for root in graph.nodes() {
        if discovery[root] != UNVISITED {
            continue;
        }
        discovery[root] = clock;
        low[root] = clock;
        clock += 1;
        let mut stack = vec![Frame {
            node: root,
            parent: UNVISITED,
            neighbors: graph.neighbors(root).collect(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let parent = frame.parent;
            if let Some(&child) = frame.neighbors.get(frame.next) {
                frame.next += 1;
                if child == parent {
                    continue;
                }
                if discovery[child] == UNVISITED {
                    discovery[child] = clock;
                    low[child] = clock;
                    clock += 1;
                    stack.push(Frame {
                        node: child,
                        parent: node,
                        neighbors: graph.neighbors(child).collect(),
                        next: 0,
                    });
                } else {
                    low[node] = low[node].min(discovery[child]);
                }
                continue;
            }

            // All neighbors done: fold lowlink into the parent.
            stack.pop();
            if parent != UNVISITED {
                low[parent] = low[parent].min(low[node]);
                if low[node] > discovery[parent] {
                    found.push((parent.min(node), parent.max(node)));
                }
            }
        }
    }

    found.sort_unstable();
    found
}

/// Returns a copy of `graph` with every bridge removed.
///
/// Node ids are preserved. The result has exactly the same chordless cycles
/// as the input.
pub fn prune_bridges(graph: &CycleGraph) -> CycleGraph {
    let mut pruned = graph.clone();
    for (a, b) in bridges(graph) {
        pruned.remove_edge(a, b);
    }
    pruned
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_path_graph_is_all_bridges() {
        let g = CycleGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).expect("valid");
        assert_eq!(bridges(&g), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_cycle_has_no_bridges() {
        let g = CycleGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]).expect("valid");
        assert!(bridges(&g).is_empty());
    }

    #[test]
    fn test_two_triangles_joined_by_bridge() {
        let g = CycleGraph::from_edges(
            6,
            [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)],
        )
        .expect("valid");
        assert_eq!(bridges(&g), vec![(2, 3)]);
        let pruned = prune_bridges(&g);
        assert_eq!(pruned.edge_count(), 6);
        assert!(!pruned.has_edge(2, 3));
        assert_eq!(pruned.node_count(), 6);
    }

    #[test]
    fn test_pendant_tree_on_cycle() {
        let g = CycleGraph::from_edges(
            7,
            [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (3, 5), (6, 5)],
        )
        .expect("valid");
        assert_eq!(bridges(&g), vec![(0, 3), (3, 4), (3, 5), (5, 6)]);
    }

    #[test]
    fn test_long_path_does_not_overflow() {
        let n = 50_000;
        let g = CycleGraph::from_edges(n, (0..n - 1).map(|i| (i, i + 1))).expect("valid");
        assert_eq!(bridges(&g).len(), n - 1);
    }
}
