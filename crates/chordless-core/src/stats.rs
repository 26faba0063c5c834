/// Per-run counters collected by the enumerator.
///
/// Counters are observability only: nothing in the search reads them back.
/// They are reset at the start of every run.
use std::fmt;

use serde::Serialize;

/// Work counters for one enumeration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Sweep nodes processed.
    pub outer_loops: u64,
    /// Closing edges searched across all sweep nodes.
    pub inner_loops: u64,
    /// Chordless-path search calls (one per path extension).
    pub tree_nodes: u64,
    /// Search calls that completed a cycle.
    pub leaves: u64,
    /// Cycles handed to the result sink.
    pub cycles: u64,
    /// Reachability oracle queries issued by the search.
    pub oracle_calls: u64,
    /// Oracle queries that found no path.
    pub failed_oracle_calls: u64,
    /// Adjacency scans performed inside the oracle.
    pub neighbor_queries: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "outer loops: {}, inner loops: {}, tree nodes: {}, leaves: {}, cycles: {}, \
             oracle calls: {} ({} failed), neighbor queries: {}",
            self.outer_loops,
            self.inner_loops,
            self.tree_nodes,
            self.leaves,
            self.cycles,
            self.oracle_calls,
            self.failed_oracle_calls,
            self.neighbor_queries,
        )
    }
}
