//! Post-run invariant checkers for correctness validation.

use std::collections::BTreeSet;

use chordless_core::{
    ChordlessCycles, CycleGraph, RunStats, SweepState, canonical_cycle, is_chordless_cycle,
};

/// Verifies that every emitted cycle is a chordless cycle of `graph`.
pub fn check_cycles_chordless(graph: &CycleGraph, cycles: &[Vec<usize>]) -> Result<(), String> {
    for cycle in cycles {
        if !is_chordless_cycle(graph, cycle) {
            return Err(format!("not a chordless cycle: {cycle:?}"));
        }
    }
    Ok(())
}

/// Verifies that no cycle is emitted twice, in any rotation or direction.
pub fn check_no_duplicates(cycles: &[Vec<usize>]) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for cycle in cycles {
        let canonical = canonical_cycle(cycle);
        if !seen.insert(canonical) {
            return Err(format!("cycle emitted twice: {cycle:?}"));
        }
    }
    Ok(())
}

/// Verifies that two runs found the same cycle set.
pub fn check_same_cycles(left: &[Vec<usize>], right: &[Vec<usize>]) -> Result<(), String> {
    let l = chordless_core::canonical_set(left);
    let r = chordless_core::canonical_set(right);
    if l == r {
        return Ok(());
    }
    let only_left = l.difference(&r).count();
    let only_right = r.difference(&l).count();
    Err(format!(
        "cycle sets differ: {only_left} only on the left, {only_right} only on the right"
    ))
}

/// Verifies the counters of a finished run against its output.
///
/// - `cycles` equals the number of emitted cycles
/// - every emitted cycle was a leaf of the search tree
/// - failed oracle calls are a subset of all oracle calls
pub fn check_stats(stats: &RunStats, emitted: usize) -> Result<(), String> {
    if stats.cycles != emitted as u64 {
        return Err(format!(
            "cycle counter mismatch: stats={}, emitted={emitted}",
            stats.cycles
        ));
    }
    if stats.leaves < stats.cycles {
        return Err(format!(
            "fewer leaves ({}) than cycles ({})",
            stats.leaves, stats.cycles
        ));
    }
    if stats.failed_oracle_calls > stats.oracle_calls {
        return Err(format!(
            "failed oracle calls ({}) exceed oracle calls ({})",
            stats.failed_oracle_calls, stats.oracle_calls
        ));
    }
    Ok(())
}

/// Verifies the state of an enumerator after `run`.
///
/// The blocked view must be fully released and the state terminal.
pub fn check_finished(cycles: &ChordlessCycles<'_, '_>) -> Result<(), String> {
    if !cycles.blocked_view().is_clear() {
        return Err("blocked view not clear after run".to_owned());
    }
    match cycles.state() {
        SweepState::Capped | SweepState::Exhausted | SweepState::Stopped => Ok(()),
        SweepState::NotStarted | SweepState::Running => {
            Err(format!("run ended in {}", cycles.state().as_str()))
        }
    }
}
