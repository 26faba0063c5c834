/// Node orders for the sweep.
///
/// The sweep accepts any permutation of the graph's nodes. This module
/// validates caller-supplied permutations and provides a few common
/// heuristics. Destructive sweeps tend to do well with
/// [`NodeOrder::smallest_first`], which peels low-degree nodes first and
/// shrinks the graph quickly. Constructive sweeps tend to prefer the
/// reverse. The centrality orders put the least central nodes first.
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::CycleGraph;

/// Why a sequence is not a permutation of the graph's nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeOrderError {
    /// The sequence names a node the graph does not contain.
    #[error("node order names unknown node {0}")]
    UnknownNode(usize),
    /// The sequence names a node more than once.
    #[error("node order lists node {0} more than once")]
    DuplicateNode(usize),
    /// The sequence leaves out a node of the graph.
    #[error("node order is missing node {0}")]
    MissingNode(usize),
}

/// Named order heuristics, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStrategy {
    /// Ascending node id.
    #[default]
    Natural,
    /// Descending node id.
    Reversed,
    /// Seeded shuffle.
    Random,
    /// Degeneracy order: repeatedly take a node of minimum remaining degree.
    SmallestFirst,
    /// Repeatedly take a node of maximum remaining degree.
    LargestFirst,
    /// Ascending PageRank score.
    PageRank,
    /// Ascending betweenness centrality.
    Betweenness,
}

impl OrderStrategy {
    /// Builds the order this strategy names. `seed` is used by
    /// [`OrderStrategy::Random`] only.
    pub fn order(self, graph: &CycleGraph, seed: u64) -> NodeOrder {
        match self {
            OrderStrategy::Natural => NodeOrder::natural(graph),
            OrderStrategy::Reversed => NodeOrder::reversed(graph),
            OrderStrategy::Random => NodeOrder::random(graph, seed),
            OrderStrategy::SmallestFirst => NodeOrder::smallest_first(graph),
            OrderStrategy::LargestFirst => NodeOrder::largest_first(graph),
            OrderStrategy::PageRank => NodeOrder::page_rank(graph),
            OrderStrategy::Betweenness => NodeOrder::betweenness(graph),
        }
    }
}

/// A validated permutation of a graph's present nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeOrder(Vec<usize>);

impl NodeOrder {
    /// Validates `order` against `graph`.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an unknown or repeated id while
    /// scanning `order`, then the smallest present node it leaves out.
    pub fn new(graph: &CycleGraph, order: Vec<usize>) -> Result<Self, NodeOrderError> {
        let mut seen = vec![false; graph.node_bound()];
        for &node in &order {
            if !graph.contains_node(node) {
                return Err(NodeOrderError::UnknownNode(node));
            }
            if seen[node] {
                return Err(NodeOrderError::DuplicateNode(node));
            }
            seen[node] = true;
        }
        if let Some(missing) = graph.nodes().find(|&n| !seen[n]) {
            return Err(NodeOrderError::MissingNode(missing));
        }
        Ok(Self(order))
    }

    /// Ascending node id.
    pub fn natural(graph: &CycleGraph) -> Self {
        Self(graph.nodes().collect())
    }

    /// Descending node id.
    pub fn reversed(graph: &CycleGraph) -> Self {
        let mut nodes: Vec<usize> = graph.nodes().collect();
        nodes.reverse();
        Self(nodes)
    }

    /// Uniform shuffle, reproducible for a given `seed`.
    pub fn random(graph: &CycleGraph, seed: u64) -> Self {
        let mut nodes: Vec<usize> = graph.nodes().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        nodes.shuffle(&mut rng);
        Self(nodes)
    }

    /// Degeneracy order via a bucket queue. Ties go to the smaller id
    /// pushed last into the bucket.
    pub fn smallest_first(graph: &CycleGraph) -> Self {
        let bound = graph.node_bound();
        let mut degree = vec![0usize; bound];
        let mut max_degree = 0;
        for node in graph.nodes() {
            degree[node] = graph.degree(node);
            max_degree = max_degree.max(degree[node]);
        }
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); max_degree + 1];
        for node in graph.nodes().collect::<Vec<_>>().into_iter().rev() {
            buckets[degree[node]].push(node);
        }

        let mut removed = vec![false; bound];
        let mut order = Vec::with_capacity(graph.node_count());
        let mut floor = 0;
        while order.len() < graph.node_count() {
            let Some(d) = (floor..buckets.len()).find(|&d| !buckets[d].is_empty()) else {
                break;
            };
            let Some(node) = buckets[d].pop() else {
                break;
            };
            // Stale entry: the node moved to a lower bucket or is gone.
            if removed[node] || degree[node] != d {
                floor = d;
                continue;
            }
            removed[node] = true;
            order.push(node);
            for neighbor in graph.neighbors(node) {
                if !removed[neighbor] {
                    degree[neighbor] -= 1;
                    buckets[degree[neighbor]].push(neighbor);
                }
            }
            floor = d.saturating_sub(1);
        }
        Self(order)
    }

    /// Greedy max-remaining-degree order. Ties go to the smaller id.
    pub fn largest_first(graph: &CycleGraph) -> Self {
        let bound = graph.node_bound();
        let mut degree = vec![0usize; bound];
        let mut heap = BinaryHeap::new();
        for node in graph.nodes() {
            degree[node] = graph.degree(node);
            heap.push((degree[node], Reverse(node)));
        }

        let mut removed = vec![false; bound];
        let mut order = Vec::with_capacity(graph.node_count());
        while let Some((d, Reverse(node))) = heap.pop() {
            if removed[node] || degree[node] != d {
                continue;
            }
            removed[node] = true;
            order.push(node);
            for neighbor in graph.neighbors(node) {
                if !removed[neighbor] {
                    degree[neighbor] -= 1;
                    heap.push((degree[neighbor], Reverse(neighbor)));
                }
            }
        }
        Self(order)
    }

    /// Nodes by ascending PageRank, ties by id.
    ///
    /// Power iteration with damping 0.85. The mass of isolated nodes is
    /// spread uniformly so scores keep summing to one.
    pub fn page_rank(graph: &CycleGraph) -> Self {
        Self::by_ascending_score(graph, &page_rank_scores(graph))
    }

    /// Nodes by ascending betweenness centrality, ties by id.
    ///
    /// Scores come from Brandes' accumulation over one BFS per node, so this
    /// costs `O(n * m)`.
    pub fn betweenness(graph: &CycleGraph) -> Self {
        Self::by_ascending_score(graph, &betweenness_scores(graph))
    }

    fn by_ascending_score(graph: &CycleGraph, score: &[f64]) -> Self {
        let mut nodes: Vec<usize> = graph.nodes().collect();
        nodes.sort_by(|&a, &b| score[a].total_cmp(&score[b]).then(a.cmp(&b)));
        Self(nodes)
    }

    /// The order as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of nodes in the order.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the order of an empty graph.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps the permutation.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

const DAMPING: f64 = 0.85;
const PAGE_RANK_TOLERANCE: f64 = 1e-10;
const PAGE_RANK_MAX_ITERATIONS: usize = 100;

/// PageRank per node id; holes in the id space score zero.
fn page_rank_scores(graph: &CycleGraph) -> Vec<f64> {
    let bound = graph.node_bound();
    let mut rank = vec![0.0; bound];
    let nodes: Vec<usize> = graph.nodes().collect();
    if nodes.is_empty() {
        return rank;
    }
    let mut degree = vec![0usize; bound];
    for &node in &nodes {
        degree[node] = graph.degree(node);
    }
    let share = 1.0 / nodes.len() as f64;
    for &node in &nodes {
        rank[node] = share;
    }

    let mut next = vec![0.0; bound];
    for _ in 0..PAGE_RANK_MAX_ITERATIONS {
        let dangling: f64 = nodes
            .iter()
            .filter(|&&node| degree[node] == 0)
            .map(|&node| rank[node])
            .sum();
        let base = (1.0 - DAMPING) * share + DAMPING * dangling * share;
        for &node in &nodes {
            let inflow: f64 = graph
                .neighbors(node)
                .map(|neighbor| rank[neighbor] / degree[neighbor] as f64)
                .sum();
            next[node] = base + DAMPING * inflow;
        }
        let change: f64 = nodes.iter().map(|&node| (next[node] - rank[node]).abs()).sum();
        std::mem::swap(&mut rank, &mut next);
        if change < PAGE_RANK_TOLERANCE {
            break;
        }
    }
    rank
}

/// Betweenness per node id, counting each unordered pair twice.
fn betweenness_scores(graph: &CycleGraph) -> Vec<f64> {
    const UNSEEN: usize = usize::MAX;

    let bound = graph.node_bound();
    let mut score = vec![0.0; bound];
    let mut dist = vec![UNSEEN; bound];
    let mut paths = vec![0.0f64; bound];
    let mut dependency = vec![0.0f64; bound];
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); bound];
    let mut visited = Vec::new();
    let mut queue = VecDeque::new();

    for source in graph.nodes() {
        dist[source] = 0;
        paths[source] = 1.0;
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            visited.push(node);
            for neighbor in graph.neighbors(node) {
                if dist[neighbor] == UNSEEN {
                    dist[neighbor] = dist[node] + 1;
                    queue.push_back(neighbor);
                }
                if dist[neighbor] == dist[node] + 1 {
                    paths[neighbor] += paths[node];
                    preds[neighbor].push(node);
                }
            }
        }

        // Farthest first, so every successor is settled before its predecessors.
        for &node in visited.iter().rev() {
            let carried = (1.0 + dependency[node]) / paths[node];
            for &pred in &preds[node] {
                dependency[pred] += paths[pred] * carried;
            }
            if node != source {
                score[node] += dependency[node];
            }
        }

        for &node in &visited {
            dist[node] = UNSEEN;
            paths[node] = 0.0;
            dependency[node] = 0.0;
            preds[node].clear();
        }
        visited.clear();
    }
    score
}

impl From<NodeOrder> for Vec<usize> {
    fn from(order: NodeOrder) -> Self {
        order.0
    }
}
