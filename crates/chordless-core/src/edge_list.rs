/// Plain-text edge-list parsing.
///
/// One edge per line as two whitespace-separated integer ids. Blank lines and
/// lines starting with `#` or `%` are skipped. Tokens after the second are
/// ignored, so weighted edge lists load as unweighted graphs. Duplicate edges
/// collapse. The node count is one more than the largest id seen.
use thiserror::Error;

use crate::graph::CycleGraph;

/// Largest node count a [`CycleGraph`] can hold. petgraph indexes nodes with
/// `u32` and reserves `u32::MAX` as its end marker.
pub const MAX_NODES: usize = u32::MAX as usize;

/// Parsing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeListOptions {
    /// Smallest id used in the file. Subtracted from every id, so 1-based
    /// files can be loaded with `first_node: 1`.
    pub first_node: usize,
    /// Upper bound on the node count, and so on the largest shifted id plus
    /// one. Values above [`MAX_NODES`] are clamped to it.
    pub max_nodes: usize,
}

impl Default for EdgeListOptions {
    fn default() -> Self {
        Self {
            first_node: 0,
            max_nodes: MAX_NODES,
        }
    }
}

/// Errors produced by [`parse_edge_list`]. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeListError {
    /// The line has fewer than two tokens.
    #[error("line {line}: expected two node ids")]
    Malformed {
        /// Offending line.
        line: usize,
    },
    /// A token is not a non-negative integer at or above `first_node`.
    #[error("line {line}: invalid node id {token:?}")]
    InvalidNodeId {
        /// Offending line.
        line: usize,
        /// The token as written.
        token: String,
    },
    /// An id would make the graph larger than [`EdgeListOptions::max_nodes`].
    #[error("line {line}: node id {node} exceeds the limit of {limit} nodes")]
    TooManyNodes {
        /// Offending line.
        line: usize,
        /// The node id as written.
        node: usize,
        /// The effective node limit.
        limit: usize,
    },
    /// Both endpoints are the same node.
    #[error("line {line}: self-loop on node {node}")]
    SelfLoop {
        /// Offending line.
        line: usize,
        /// The node id as written.
        node: usize,
    },
}

fn parse_id(token: &str, line: usize, first_node: usize) -> Result<usize, EdgeListError> {
    token
        .parse::<usize>()
        .ok()
        .and_then(|id| id.checked_sub(first_node))
        .ok_or_else(|| EdgeListError::InvalidNodeId {
            line,
            token: token.to_owned(),
        })
}

/// Parses `text` into a graph.
///
/// # Errors
///
/// Returns the first [`EdgeListError`] encountered.
pub fn parse_edge_list(text: &str, options: &EdgeListOptions) -> Result<CycleGraph, EdgeListError> {
    let mut edges = Vec::new();
    let mut node_count = 0usize;
    let limit = options.max_nodes.min(MAX_NODES);

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let (Some(a), Some(b)) = (tokens.next(), tokens.next()) else {
            return Err(EdgeListError::Malformed { line });
        };
        let a = parse_id(a, line, options.first_node)?;
        let b = parse_id(b, line, options.first_node)?;
        if a == b {
            return Err(EdgeListError::SelfLoop {
                line,
                node: a + options.first_node,
            });
        }
        let high = a.max(b);
        if high >= limit {
            return Err(EdgeListError::TooManyNodes {
                line,
                node: high + options.first_node,
                limit,
            });
        }
        node_count = node_count.max(high + 1);
        edges.push((a, b));
    }

    let mut graph = CycleGraph::with_nodes(node_count);
    for (a, b) in edges {
        graph.add_edge(a, b);
    }
    Ok(graph)
}
