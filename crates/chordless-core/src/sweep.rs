/// The outer loop: attributes every chordless cycle to exactly one node.
///
/// Both modes walk the node order and, for each node `u`, search every edge
/// `u`–`v` of a private sweep graph as a closing edge. They differ in which
/// graph is searched:
///
/// - [`SweepMode::Destructive`] starts from the full graph and deletes `u`
///   after processing it, so each cycle is found at its earliest member.
/// - [`SweepMode::Constructive`] starts edgeless and inserts `u` with its
///   edges to already-inserted nodes, so each cycle is found at its latest
///   member.
///
/// While `u`'s edges are processed one by one, each handled neighbor stays
/// blocked so that a later closing edge of `u` cannot route through it. That
/// neighbor is adjacent to `u` in the input, and would be a chord.
use serde::{Deserialize, Serialize};

use crate::graph::{BlockedView, CycleGraph, ReachabilityOracle};
use crate::search::PathSearch;

/// Which way the sweep graph evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Remove processed nodes from the full graph.
    #[default]
    Destructive,
    /// Insert nodes into an initially edgeless graph.
    Constructive,
}

impl SweepMode {
    /// Both modes.
    pub const ALL: [SweepMode; 2] = [SweepMode::Destructive, SweepMode::Constructive];

    /// Stable lowercase name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SweepMode::Destructive => "destructive",
            SweepMode::Constructive => "constructive",
        }
    }
}

/// Lifecycle of an enumeration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepState {
    /// No run has started.
    #[default]
    NotStarted,
    /// A run is in progress.
    Running,
    /// The configured cycle cap was reached.
    Capped,
    /// Every node was processed without reaching the cap.
    Exhausted,
    /// The cycle consumer asked to stop.
    Stopped,
}

impl SweepState {
    /// Returns `true` for the states a finished run can end in.
    pub fn is_terminal(self) -> bool {
        match self {
            SweepState::Capped | SweepState::Exhausted | SweepState::Stopped => true,
            SweepState::NotStarted | SweepState::Running => false,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            SweepState::NotStarted => "not_started",
            SweepState::Running => "running",
            SweepState::Capped => "capped",
            SweepState::Exhausted => "exhausted",
            SweepState::Stopped => "stopped",
        }
    }
}

/// Runs one sweep of `graph` in `order`, feeding closing edges to `search`.
///
/// `view` must be clear on entry and is clear again on return.
pub(crate) fn run<O: ReachabilityOracle>(
    mode: SweepMode,
    graph: &CycleGraph,
    order: &[usize],
    view: &mut BlockedView,
    search: &mut PathSearch<'_, '_, O>,
) {
    match mode {
        SweepMode::Destructive => destructive(graph, order, view, search),
        SweepMode::Constructive => constructive(graph, order, view, search),
    }
}

fn destructive<O: ReachabilityOracle>(
    graph: &CycleGraph,
    order: &[usize],
    view: &mut BlockedView,
    search: &mut PathSearch<'_, '_, O>,
) {
    let mut sweep = graph.clone();
    for &u in order {
        if search.halted() {
            break;
        }
        search.stats_mut().outer_loops += 1;
        let neighbors: Vec<usize> = sweep.neighbors(u).collect();
        log::trace!("destructive sweep: node {u}, {} live edges", neighbors.len());
        close_neighbors(&mut sweep, view, search, u, &neighbors);
        sweep.remove_node(u);
    }
}

fn constructive<O: ReachabilityOracle>(
    graph: &CycleGraph,
    order: &[usize],
    view: &mut BlockedView,
    search: &mut PathSearch<'_, '_, O>,
) {
    let mut sweep = graph.without_edges();
    let mut inserted = vec![false; graph.node_bound()];
    for &u in order {
        if search.halted() {
            break;
        }
        search.stats_mut().outer_loops += 1;
        inserted[u] = true;
        let neighbors: Vec<usize> = graph.neighbors(u).filter(|&v| inserted[v]).collect();
        log::trace!("constructive sweep: node {u}, {} live edges", neighbors.len());
        for &v in &neighbors {
            sweep.add_edge(u, v);
        }
        close_neighbors(&mut sweep, view, search, u, &neighbors);
        for &v in &neighbors {
            sweep.add_edge(u, v);
        }
    }
}

/// Searches each edge `u`–`v` as a closing edge, removing it from `sweep`
/// for the search and keeping `v` blocked afterwards.
fn close_neighbors<O: ReachabilityOracle>(
    sweep: &mut CycleGraph,
    view: &mut BlockedView,
    search: &mut PathSearch<'_, '_, O>,
    u: usize,
    neighbors: &[usize],
) {
    let mut closed = Vec::with_capacity(neighbors.len());
    for &v in neighbors {
        if search.halted() {
            break;
        }
        search.stats_mut().inner_loops += 1;
        sweep.remove_edge(u, v);
        search.close_edge(sweep, view, u, v);
        view.block(v);
        closed.push(v);
    }
    for v in closed {
        view.unblock(v);
    }
}
