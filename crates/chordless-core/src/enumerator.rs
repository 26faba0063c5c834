/// Public entry point: configure, run, and inspect a chordless-cycle
/// enumeration.
///
/// [`ChordlessCycles`] owns everything that lives for one run (the blocked
/// view, the result sink, the counters) and borrows the input graph. The
/// graph itself is never mutated; each sweep works on a private copy.
///
/// ```
/// use chordless_core::{ChordlessCycles, CycleGraph, EnumerationConfig, SweepState};
///
/// let square = CycleGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
/// let mut cycles = ChordlessCycles::new(&square, EnumerationConfig::default());
/// assert_eq!(cycles.run(), SweepState::Exhausted);
/// assert_eq!(cycles.cycles().unwrap().len(), 2);
/// ```
use std::ops::ControlFlow;

use thiserror::Error;

use crate::graph::{BfsOracle, BlockedView, CycleGraph};
use crate::order::{NodeOrder, NodeOrderError};
use crate::search::{PathSearch, SearchLevel};
use crate::sink::{CycleSink, EmitStatus, Emitter};
use crate::stats::RunStats;
use crate::sweep::{self, SweepMode, SweepState};

/// Errors surfaced by [`ChordlessCycles`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// The supplied node order is not a permutation of the graph's nodes.
    #[error("invalid node order: {0}")]
    InvalidNodeOrder(#[from] NodeOrderError),
    /// Results were requested but a callback consumer received them instead.
    #[error("results not retained because a callback consumer was configured")]
    CallbackConsumer,
    /// Results were requested before the first run.
    #[error("no results: the enumeration has not been run")]
    NotRun,
}

/// Run configuration.
///
/// Plain data with public fields; start from [`Default`] and override what
/// you need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnumerationConfig {
    /// Stop after this many cycles. `None` means unbounded.
    pub max_cycles: Option<usize>,
    /// Destructive or constructive sweep.
    pub mode: SweepMode,
    /// Search optimization level.
    pub level: SearchLevel,
}

/// A configured chordless-cycle enumeration over a borrowed graph.
#[derive(Debug)]
pub struct ChordlessCycles<'g, 'cb> {
    graph: &'g CycleGraph,
    order: Vec<usize>,
    config: EnumerationConfig,
    sink: CycleSink<'cb>,
    view: BlockedView,
    stats: RunStats,
    state: SweepState,
}

impl<'g, 'cb> ChordlessCycles<'g, 'cb> {
    /// Enumerates in ascending node-id order, collecting results.
    pub fn new(graph: &'g CycleGraph, config: EnumerationConfig) -> Self {
        Self::from_parts(graph, NodeOrder::natural(graph).into_inner(), config)
    }

    /// Enumerates in a caller-supplied order.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::InvalidNodeOrder`] if `order` is not a
    /// permutation of the graph's present nodes.
    pub fn with_order(
        graph: &'g CycleGraph,
        order: Vec<usize>,
        config: EnumerationConfig,
    ) -> Result<Self, EnumerationError> {
        let order = NodeOrder::new(graph, order)?;
        Ok(Self::from_parts(graph, order.into_inner(), config))
    }

    /// Enumerates in an already-validated order.
    pub fn with_node_order(graph: &'g CycleGraph, order: NodeOrder, config: EnumerationConfig) -> Self {
        Self::from_parts(graph, order.into_inner(), config)
    }

    fn from_parts(graph: &'g CycleGraph, order: Vec<usize>, config: EnumerationConfig) -> Self {
        Self {
            graph,
            order,
            config,
            sink: CycleSink::collecting(),
            view: BlockedView::for_graph(graph),
            stats: RunStats::default(),
            state: SweepState::NotStarted,
        }
    }

    /// Sends cycles to `consumer` instead of retaining them. Returning
    /// `ControlFlow::Break(())` stops the sweep after that cycle.
    #[must_use]
    pub fn with_callback<F>(mut self, consumer: F) -> Self
    where
        F: FnMut(&[usize]) -> ControlFlow<()> + 'cb,
    {
        self.sink = CycleSink::callback(consumer);
        self
    }

    /// Sends every cycle to `consumer` instead of retaining them.
    #[must_use]
    pub fn for_each_cycle<F>(mut self, consumer: F) -> Self
    where
        F: FnMut(&[usize]) + 'cb,
    {
        self.sink = CycleSink::for_each(consumer);
        self
    }

    /// Runs the sweep to exhaustion, the cap, or a consumer stop.
    ///
    /// Results and counters from a previous run are discarded first.
    pub fn run(&mut self) -> SweepState {
        self.state = SweepState::Running;
        self.sink.clear();
        self.view = BlockedView::for_graph(self.graph);

        let emitter = Emitter::new(&mut self.sink, self.graph, self.config.max_cycles);
        let mut search = PathSearch::new(BfsOracle::for_graph(self.graph), emitter, self.config.level);
        sweep::run(
            self.config.mode,
            self.graph,
            &self.order,
            &mut self.view,
            &mut search,
        );
        let (stats, status) = search.finish();

        debug_assert!(self.view.is_clear(), "blocked view not clear after run");
        self.stats = stats;
        self.state = match status {
            EmitStatus::Open => SweepState::Exhausted,
            EmitStatus::Capped => SweepState::Capped,
            EmitStatus::Stopped => SweepState::Stopped,
        };
        log::debug!(
            "{} sweep ({} search) over {} nodes finished {}: {}",
            self.config.mode.as_str(),
            self.config.level.as_str(),
            self.order.len(),
            self.state.as_str(),
            self.stats,
        );
        self.state
    }

    /// Returns the retained cycles of the last run.
    ///
    /// # Errors
    ///
    /// - [`EnumerationError::CallbackConsumer`] if a callback was configured.
    /// - [`EnumerationError::NotRun`] before the first [`run`](Self::run).
    pub fn cycles(&self) -> Result<&[Vec<usize>], EnumerationError> {
        let cycles = self.sink.cycles().ok_or(EnumerationError::CallbackConsumer)?;
        if self.state == SweepState::NotStarted {
            return Err(EnumerationError::NotRun);
        }
        Ok(cycles)
    }

    /// Consumes the enumerator, returning the retained cycles.
    ///
    /// # Errors
    ///
    /// Same as [`cycles`](Self::cycles).
    pub fn into_cycles(self) -> Result<Vec<Vec<usize>>, EnumerationError> {
        if self.state == SweepState::NotStarted && !self.sink.is_callback() {
            return Err(EnumerationError::NotRun);
        }
        self.sink.into_cycles().ok_or(EnumerationError::CallbackConsumer)
    }

    /// Counters of the last run.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// State of the last run.
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// The blocked view after the last run. Every count is zero outside a
    /// run.
    pub fn blocked_view(&self) -> &BlockedView {
        &self.view
    }

    /// The node order the sweep uses.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The run configuration.
    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }
}

/// Collects every chordless cycle of `graph` with the default configuration.
pub fn chordless_cycles(graph: &CycleGraph) -> Vec<Vec<usize>> {
    let mut cycles = Vec::new();
    ChordlessCycles::new(graph, EnumerationConfig::default())
        .for_each_cycle(|cycle| cycles.push(cycle.to_vec()))
        .run();
    cycles
}
