#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod edge_list;
pub mod enumerator;
pub mod graph;
pub mod order;
pub mod search;
pub mod sink;
pub mod stats;
pub mod sweep;
pub mod verify;

pub use edge_list::{EdgeListError, EdgeListOptions, MAX_NODES, parse_edge_list};
pub use enumerator::{ChordlessCycles, EnumerationConfig, EnumerationError, chordless_cycles};
pub use graph::{
    BfsOracle, BlockScope, BlockedView, CycleGraph, Direction, GraphBuildError, NodeFilter,
    ReachabilityOracle, bridges, prune_bridges,
};
pub use order::{NodeOrder, NodeOrderError, OrderStrategy};
pub use search::SearchLevel;
pub use sink::{CycleCallback, CycleSink};
pub use stats::RunStats;
pub use sweep::{SweepMode, SweepState};
pub use verify::{canonical_cycle, canonical_set, is_chordless_cycle};

/// Returns the current version of the chordless-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
