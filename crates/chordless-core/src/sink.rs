/// Destinations for emitted cycles.
///
/// A [`CycleSink`] either keeps every cycle in memory or forwards each one to
/// a caller-supplied consumer. The consumer answers with
/// [`ControlFlow`]: `Continue(())` to keep sweeping, `Break(())` to stop.
/// Consumers that never stop are wrapped so they always continue.
///
/// The crate-internal [`Emitter`] sits between the search and the sink and
/// enforces the cycle cap, so the search only ever asks "may I keep going?".
use std::fmt;
use std::ops::ControlFlow;

use crate::graph::CycleGraph;
use crate::verify;

/// Boxed cycle consumer.
pub type CycleCallback<'cb> = Box<dyn FnMut(&[usize]) -> ControlFlow<()> + 'cb>;

/// Where emitted cycles go.
pub enum CycleSink<'cb> {
    /// Append each cycle to an in-memory list.
    Collect(Vec<Vec<usize>>),
    /// Hand each cycle to a consumer that may request a stop.
    Callback(CycleCallback<'cb>),
}

impl<'cb> CycleSink<'cb> {
    /// Returns an empty collecting sink.
    pub fn collecting() -> Self {
        CycleSink::Collect(Vec::new())
    }

    /// Wraps a cancelling consumer.
    pub fn callback<F>(consumer: F) -> Self
    where
        F: FnMut(&[usize]) -> ControlFlow<()> + 'cb,
    {
        CycleSink::Callback(Box::new(consumer))
    }

    /// Wraps a consumer that never asks to stop.
    pub fn for_each<F>(mut consumer: F) -> Self
    where
        F: FnMut(&[usize]) + 'cb,
    {
        Self::callback(move |cycle| {
            consumer(cycle);
            ControlFlow::Continue(())
        })
    }

    /// Returns `true` for the consumer variant.
    pub fn is_callback(&self) -> bool {
        matches!(self, CycleSink::Callback(_))
    }

    /// Returns retained cycles, or `None` for the consumer variant.
    pub fn cycles(&self) -> Option<&[Vec<usize>]> {
        match self {
            CycleSink::Collect(cycles) => Some(cycles),
            CycleSink::Callback(_) => None,
        }
    }

    /// Consumes the sink, returning retained cycles if any were kept.
    pub fn into_cycles(self) -> Option<Vec<Vec<usize>>> {
        match self {
            CycleSink::Collect(cycles) => Some(cycles),
            CycleSink::Callback(_) => None,
        }
    }

    /// Drops any retained cycles.
    pub fn clear(&mut self) {
        match self {
            CycleSink::Collect(cycles) => cycles.clear(),
            CycleSink::Callback(_) => {}
        }
    }

    /// Delivers one cycle. Returns `false` if the consumer asked to stop.
    fn accept(&mut self, cycle: &[usize]) -> bool {
        match self {
            CycleSink::Collect(cycles) => {
                cycles.push(cycle.to_vec());
                true
            }
            CycleSink::Callback(consumer) => consumer(cycle).is_continue(),
        }
    }
}

impl Default for CycleSink<'_> {
    fn default() -> Self {
        Self::collecting()
    }
}

impl fmt::Debug for CycleSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSink::Collect(cycles) => f.debug_tuple("Collect").field(&cycles.len()).finish(),
            CycleSink::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Why an [`Emitter`] stopped accepting cycles, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmitStatus {
    Open,
    Capped,
    Stopped,
}

/// Cap-enforcing front end of a [`CycleSink`] for one run.
pub(crate) struct Emitter<'s, 'cb> {
    sink: &'s mut CycleSink<'cb>,
    /// Graph the emitted cycles must be chordless in.
    reference: &'s CycleGraph,
    cap: Option<usize>,
    emitted: usize,
    stopped: bool,
}

impl<'s, 'cb> Emitter<'s, 'cb> {
    pub(crate) fn new(
        sink: &'s mut CycleSink<'cb>,
        reference: &'s CycleGraph,
        cap: Option<usize>,
    ) -> Self {
        Self {
            sink,
            reference,
            cap,
            emitted: 0,
            stopped: false,
        }
    }

    /// Returns `true` once no further cycle will be accepted.
    pub(crate) fn halted(&self) -> bool {
        self.status() != EmitStatus::Open
    }

    pub(crate) fn status(&self) -> EmitStatus {
        if self.stopped {
            EmitStatus::Stopped
        } else if self.cap.is_some_and(|cap| self.emitted >= cap) {
            EmitStatus::Capped
        } else {
            EmitStatus::Open
        }
    }

    /// Hands `cycle` to the sink unless the emitter has halted.
    ///
    /// Returns `true` if the cycle was delivered.
    pub(crate) fn emit(&mut self, cycle: &[usize]) -> bool {
        if self.halted() {
            return false;
        }
        debug_assert!(
            verify::is_chordless_cycle(self.reference, cycle),
            "emitted sequence {cycle:?} is not a chordless cycle"
        );
        self.emitted += 1;
        if !self.sink.accept(cycle) {
            self.stopped = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn triangle() -> CycleGraph {
        CycleGraph::from_edges(3, [(0, 1), (1, 2), (2, 0)]).expect("valid")
    }

    #[test]
    fn test_collecting_sink_retains_cycles() {
        let g = triangle();
        let mut sink = CycleSink::collecting();
        let mut emitter = Emitter::new(&mut sink, &g, None);
        assert!(emitter.emit(&[0, 1, 2]));
        assert_eq!(emitter.status(), EmitStatus::Open);
        assert_eq!(sink.cycles().map(<[_]>::len), Some(1));
        sink.clear();
        assert_eq!(sink.cycles().map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_cap_halts_emission() {
        let g = triangle();
        let mut sink = CycleSink::collecting();
        let mut emitter = Emitter::new(&mut sink, &g, Some(1));
        assert!(emitter.emit(&[0, 1, 2]));
        assert!(emitter.halted());
        assert!(!emitter.emit(&[1, 2, 0]));
        assert_eq!(emitter.status(), EmitStatus::Capped);
        assert_eq!(sink.into_cycles().map(|c| Vec::len(&c)), Some(1));
    }

    #[test]
    fn test_zero_cap_accepts_nothing() {
        let g = triangle();
        let mut sink = CycleSink::collecting();
        let emitter = Emitter::new(&mut sink, &g, Some(0));
        assert_eq!(emitter.status(), EmitStatus::Capped);
    }

    #[test]
    fn test_callback_break_stops() {
        let g = triangle();
        let mut seen = 0;
        {
            let mut sink = CycleSink::callback(|_| {
                seen += 1;
                ControlFlow::Break(())
            });
            assert!(sink.is_callback());
            assert!(sink.cycles().is_none());
            let mut emitter = Emitter::new(&mut sink, &g, None);
            assert!(emitter.emit(&[0, 1, 2]));
            assert_eq!(emitter.status(), EmitStatus::Stopped);
            assert!(!emitter.emit(&[0, 1, 2]));
        }
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_for_each_never_stops() {
        let g = triangle();
        let mut seen = Vec::new();
        {
            let mut sink = CycleSink::for_each(|cycle| seen.push(cycle.len()));
            let mut emitter = Emitter::new(&mut sink, &g, None);
            for _ in 0..3 {
                assert!(emitter.emit(&[2, 0, 1]));
            }
            assert!(!emitter.halted());
        }
        assert_eq!(seen, vec![3, 3, 3]);
    }

    #[test]
    fn test_debug_hides_callback() {
        let sink = CycleSink::for_each(|_| {});
        assert_eq!(format!("{sink:?}"), "Callback(..)");
        assert_eq!(format!("{:?}", CycleSink::collecting()), "Collect(0)");
    }
}
