/// Independent checks on emitted cycles.
///
/// These helpers do not share code with the search. They are used by debug
/// assertions on every emitted cycle, by the test suites, and by the bench
/// crate's correctness checkers.
use std::collections::{BTreeSet, HashSet};

use crate::graph::CycleGraph;

/// Returns `true` if `cycle` is a chordless cycle of `graph`.
///
/// The sequence must have at least three distinct present nodes, each
/// adjacent to the next (wrapping around), with no edge between two
/// non-consecutive members.
pub fn is_chordless_cycle(graph: &CycleGraph, cycle: &[usize]) -> bool {
    let len = cycle.len();
    if len < 3 {
        return false;
    }
    let distinct: HashSet<usize> = cycle.iter().copied().collect();
    if distinct.len() != len || cycle.iter().any(|&n| !graph.contains_node(n)) {
        return false;
    }
    for i in 0..len {
        for j in (i + 1)..len {
            let consecutive = j == i + 1 || (i == 0 && j == len - 1);
            if graph.has_edge(cycle[i], cycle[j]) != consecutive {
                return false;
            }
        }
    }
    true
}

/// Returns the canonical rotation and orientation of `cycle`.
///
/// The smallest id comes first and the walk continues toward the smaller of
/// its two neighbors, so every rotation or reversal of the same cycle maps to
/// one sequence.
pub fn canonical_cycle(cycle: &[usize]) -> Vec<usize> {
    let Some(pivot) = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, &n)| n)
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let mut rotated: Vec<usize> = cycle[pivot..].iter().chain(&cycle[..pivot]).copied().collect();
    if rotated.len() > 2 && rotated[1] > rotated[rotated.len() - 1] {
        rotated[1..].reverse();
    }
    rotated
}

/// Canonicalizes every cycle into an ordered set for order-insensitive
/// comparison of enumeration results.
pub fn canonical_set<'a, I>(cycles: I) -> BTreeSet<Vec<usize>>
where
    I: IntoIterator<Item = &'a Vec<usize>>,
{
    cycles.into_iter().map(|c| canonical_cycle(c.as_slice())).collect()
}
