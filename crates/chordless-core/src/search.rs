/// Chordless-path search: the recursive core of the enumerator.
///
/// Given a start node `s` and a target `t` whose direct edge has been taken
/// out of the sweep graph, [`PathSearch::close_edge`] emits every chordless
/// path from `s` to `t`. Each such path closes into a chordless cycle through
/// the missing edge.
///
/// Chordlessness is kept by construction. When the path moves from `current`
/// to `next`, every other neighbor of `current` is blocked, so no later path
/// node can be adjacent to `current`. `current` itself is blocked for the
/// whole time it sits on the path.
///
/// # Levels
///
/// [`SearchLevel`] selects how much work the engine saves:
///
/// - [`SearchLevel::Exhaustive`] tries every active neighbor and checks
///   reachability before each descent.
/// - [`SearchLevel::Witness`] asks the oracle for one shortest path and
///   follows it greedily, so a single query serves the whole descent. Only
///   the detours off that path need fresh queries.
/// - [`SearchLevel::Marked`] adds *marks*: a conservative set of nodes known
///   to still reach the target. A detour whose neighborhood holds no marked
///   node is skipped without an oracle query. Marks are refreshed from a
///   reachability mask whenever a cycle is emitted and widened by flood fill
///   as each level unwinds.
///
/// All three levels emit the same set of cycles.
use serde::{Deserialize, Serialize};

use crate::graph::{BlockedView, CycleGraph, Direction, NodeFilter, ReachabilityOracle};
use crate::sink::{EmitStatus, Emitter};
use crate::stats::RunStats;

// ---------------------------------------------------------------------------
// SearchLevel
// ---------------------------------------------------------------------------

/// Optimization level of the chordless-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLevel {
    /// Plain backtracking with a reachability check per descent.
    Exhaustive,
    /// Follow oracle witness paths, query only for detours.
    Witness,
    /// Witness following plus marks pruning.
    #[default]
    Marked,
}

impl SearchLevel {
    /// Every level, cheapest to configure first.
    pub const ALL: [SearchLevel; 3] = [
        SearchLevel::Exhaustive,
        SearchLevel::Witness,
        SearchLevel::Marked,
    ];

    /// Stable lowercase name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchLevel::Exhaustive => "exhaustive",
            SearchLevel::Witness => "witness",
            SearchLevel::Marked => "marked",
        }
    }

    fn uses_marks(self) -> bool {
        match self {
            SearchLevel::Marked => true,
            SearchLevel::Exhaustive | SearchLevel::Witness => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

/// Nodes believed to still reach the current target.
#[derive(Debug, Clone)]
struct Marks {
    bits: Vec<bool>,
}

impl Marks {
    /// Everything marked: forces at least one real query before pruning.
    fn all(bound: usize) -> Self {
        Self {
            bits: vec![true; bound],
        }
    }

    fn get(&self, node: usize) -> bool {
        self.bits.get(node).copied().unwrap_or(false)
    }

    fn set(&mut self, node: usize) {
        if let Some(bit) = self.bits.get_mut(node) {
            *bit = true;
        }
    }

    fn any_neighbor_marked(&self, graph: &CycleGraph, node: usize) -> bool {
        graph.neighbors(node).any(|n| self.get(n))
    }
}

/// Excludes blocked nodes and nodes already marked.
struct MarkedOrBlocked<'a> {
    view: &'a BlockedView,
    marks: &'a Marks,
}

impl NodeFilter for MarkedOrBlocked<'_> {
    fn excludes(&self, node: usize) -> bool {
        self.view.excludes(node) || self.marks.get(node)
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// One run's search engine: oracle, emitter, and counters.
pub(crate) struct PathSearch<'s, 'cb, O> {
    oracle: O,
    emitter: Emitter<'s, 'cb>,
    stats: RunStats,
    level: SearchLevel,
}

impl<'s, 'cb, O: ReachabilityOracle> PathSearch<'s, 'cb, O> {
    pub(crate) fn new(oracle: O, emitter: Emitter<'s, 'cb>, level: SearchLevel) -> Self {
        Self {
            oracle,
            emitter,
            stats: RunStats::default(),
            level,
        }
    }

    /// Returns `true` once the cap is reached or the consumer asked to stop.
    pub(crate) fn halted(&self) -> bool {
        self.emitter.halted()
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    /// Ends the run, returning the counters and the emitter's final status.
    pub(crate) fn finish(self) -> (RunStats, EmitStatus) {
        let mut stats = self.stats;
        stats.neighbor_queries = self.oracle.neighbor_queries();
        (stats, self.emitter.status())
    }

    /// Emits every chordless path from `start` to `target` in the active
    /// part of `graph`, each closed into a cycle by the absent edge
    /// `start`–`target`.
    pub(crate) fn close_edge(
        &mut self,
        graph: &CycleGraph,
        view: &mut BlockedView,
        start: usize,
        target: usize,
    ) {
        debug_assert!(!graph.has_edge(start, target));
        if self.halted() {
            return;
        }
        match self.level {
            SearchLevel::Exhaustive => {
                if self.reachable(graph, view, start, target) {
                    let mut path = vec![start];
                    self.extend(graph, view, &mut path, target);
                }
            }
            SearchLevel::Witness | SearchLevel::Marked => {
                let Some(mut path) = self.witness(graph, view, start, target) else {
                    return;
                };
                let mut marks = self
                    .level
                    .uses_marks()
                    .then(|| Marks::all(graph.node_bound()));
                self.follow(graph, view, &mut path, 0, marks.as_mut());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Oracle wrappers
    // -----------------------------------------------------------------------

    fn reachable(&mut self, graph: &CycleGraph, view: &BlockedView, from: usize, to: usize) -> bool {
        self.stats.oracle_calls += 1;
        let found = self.oracle.is_reachable(graph, view, from, to);
        if !found {
            self.stats.failed_oracle_calls += 1;
        }
        found
    }

    fn witness(
        &mut self,
        graph: &CycleGraph,
        view: &BlockedView,
        from: usize,
        to: usize,
    ) -> Option<Vec<usize>> {
        self.stats.oracle_calls += 1;
        let path = self
            .oracle
            .shortest_witness_path(graph, view, from, to, Direction::Forward);
        if path.is_empty() {
            self.stats.failed_oracle_calls += 1;
            return None;
        }
        Some(path)
    }

    fn emit(&mut self, cycle: &[usize]) {
        if self.emitter.emit(cycle) {
            self.stats.cycles += 1;
        }
    }

    // -----------------------------------------------------------------------
    // Exhaustive level
    // -----------------------------------------------------------------------

    /// Extends `path` one hop at a time, checking reachability before every
    /// descent.
    fn extend(
        &mut self,
        graph: &CycleGraph,
        view: &mut BlockedView,
        path: &mut Vec<usize>,
        target: usize,
    ) {
        if self.halted() {
            return;
        }
        let Some(&current) = path.last() else {
            return;
        };
        debug_assert!(view.is_active(current), "search entered blocked node {current}");
        self.stats.tree_nodes += 1;
        let mut scope = view.block_scoped(current);

        // Adjacent to the target: closing now is the only chordless option.
        if graph.has_edge(current, target) {
            if scope.is_active(target) {
                path.push(target);
                self.emit(path);
                self.stats.leaves += 1;
                path.pop();
            }
            return;
        }

        for next in graph.neighbors(current) {
            if self.halted() {
                break;
            }
            if !scope.is_active(next) {
                continue;
            }
            let mut step = scope.block_neighbors_scoped(graph, current, next);
            if self.reachable(graph, &step, next, target) {
                path.push(next);
                self.extend(graph, &mut step, path, target);
                path.pop();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Witness and marked levels
    // -----------------------------------------------------------------------

    /// Follows the witness `path` from position `pos`, emitting it when the
    /// end is reached and branching into detours on the way back.
    ///
    /// `path[pos + 1..]` must be a shortest active path to the target.
    /// `marks` is the parent's mark set: it is refreshed at a leaf and
    /// widened before returning, so the parent sees the update.
    fn follow(
        &mut self,
        graph: &CycleGraph,
        view: &mut BlockedView,
        path: &mut Vec<usize>,
        pos: usize,
        mut marks: Option<&mut Marks>,
    ) {
        if self.halted() {
            return;
        }
        debug_assert!(pos + 1 < path.len(), "witness path too short to follow");
        let current = path[pos];
        let next = path[pos + 1];
        let Some(&target) = path.last() else {
            return;
        };
        debug_assert!(view.is_active(current), "search entered blocked node {current}");
        self.stats.tree_nodes += 1;
        let mut scope = view.block_scoped(current);

        if next == target {
            self.emit(&path[..]);
            self.stats.leaves += 1;
            if let Some(marks) = marks {
                if !self.halted() {
                    self.stats.oracle_calls += 1;
                    marks.bits = self.oracle.reachability_mask(graph, &*scope, target);
                }
            }
            return;
        }

        // Suggested hop: reuse the witness.
        {
            let mut step = scope.block_neighbors_scoped(graph, current, next);
            self.follow(graph, &mut step, path, pos + 1, marks.as_deref_mut());
        }

        // Detours: every other active neighbor that may still reach the target.
        for detour in graph.neighbors(current) {
            if self.halted() {
                break;
            }
            if detour == next || detour == target || !scope.is_active(detour) {
                continue;
            }
            if marks
                .as_deref()
                .is_some_and(|marks| !marks.any_neighbor_marked(graph, detour))
            {
                continue;
            }
            let mut step = scope.block_neighbors_scoped(graph, current, detour);
            if let Some(suffix) = self.witness(graph, &step, detour, target) {
                path.truncate(pos + 1);
                path.extend(suffix);
                let mut fresh = marks.is_some().then(|| Marks::all(graph.node_bound()));
                self.follow(graph, &mut step, path, pos + 1, fresh.as_mut());
            }
        }

        if let Some(marks) = marks {
            if !self.halted() {
                self.widen(graph, &scope, current, marks);
            }
        }
    }

    /// Flood-fills from each unmarked, active neighbor of `current` that
    /// touches a marked node, marking everything it reaches.
    fn widen(&mut self, graph: &CycleGraph, view: &BlockedView, current: usize, marks: &mut Marks) {
        for neighbor in graph.neighbors(current) {
            if view.excludes(neighbor) || marks.get(neighbor) {
                continue;
            }
            if !marks.any_neighbor_marked(graph, neighbor) {
                continue;
            }
            self.stats.oracle_calls += 1;
            let filter = MarkedOrBlocked { view, marks };
            let reached = self.oracle.reachable_nodes(graph, &filter, neighbor);
            for node in reached {
                marks.set(node);
            }
        }
    }
}
