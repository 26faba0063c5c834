//! Implementation of `chordless summary <file>`.
//!
//! Runs the enumeration without retaining cycles and reports the total, a
//! histogram of cycle lengths, the final sweep state, and the run counters.
use std::collections::BTreeMap;

use chordless_core::{RunStats, SweepState};

use crate::OutputFormat;
use crate::cli::EnumerateArgs;
use crate::cmd::{enumerator, load_graph, write_json};
use crate::error::CliError;

/// Aggregated result of one run.
#[derive(Debug, Default)]
struct Summary {
    nodes: usize,
    edges: usize,
    lengths: BTreeMap<usize, u64>,
    state: SweepState,
    stats: RunStats,
}

impl Summary {
    fn total(&self) -> u64 {
        self.lengths.values().sum()
    }

    fn max_length(&self) -> Option<usize> {
        self.lengths.keys().next_back().copied()
    }
}

/// Runs the `summary` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be read or parsed.
/// - [`CliError`] exit code 1 if stdout cannot be written.
pub fn run(args: &EnumerateArgs, format: OutputFormat, max_size: u64) -> Result<(), CliError> {
    let graph = load_graph(&args.graph, max_size)?;

    let mut lengths = BTreeMap::new();
    let mut cycles = enumerator(&graph, args).for_each_cycle(|cycle| {
        *lengths.entry(cycle.len()).or_insert(0u64) += 1;
    });
    let state = cycles.run();
    let stats = *cycles.stats();
    drop(cycles);

    let summary = Summary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        lengths,
        state,
        stats,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &summary),
        OutputFormat::Json => print_json(&mut out, &summary),
    }
    .map_err(|e| CliError::output(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, summary: &Summary) -> std::io::Result<()> {
    writeln!(w, "nodes:  {}", summary.nodes)?;
    writeln!(w, "edges:  {}", summary.edges)?;
    writeln!(w, "cycles: {}", summary.total())?;
    if let Some(max) = summary.max_length() {
        writeln!(w, "longest: {max}")?;
        writeln!(w, "by length:")?;
        for (length, count) in &summary.lengths {
            writeln!(w, "  {length:>4}  {count}")?;
        }
    }
    writeln!(w, "state:  {}", summary.state.as_str())?;
    writeln!(w, "{}", summary.stats)
}

fn print_json<W: std::io::Write>(w: &mut W, summary: &Summary) -> std::io::Result<()> {
    let mut by_length = serde_json::Map::new();
    for (length, count) in &summary.lengths {
        by_length.insert(length.to_string(), serde_json::Value::Number((*count).into()));
    }

    let mut obj = serde_json::Map::new();
    obj.insert(
        "nodes".to_owned(),
        serde_json::Value::Number(summary.nodes.into()),
    );
    obj.insert(
        "edges".to_owned(),
        serde_json::Value::Number(summary.edges.into()),
    );
    obj.insert(
        "count".to_owned(),
        serde_json::Value::Number(summary.total().into()),
    );
    obj.insert(
        "max_length".to_owned(),
        summary
            .max_length()
            .map_or(serde_json::Value::Null, |max| {
                serde_json::Value::Number(max.into())
            }),
    );
    obj.insert("by_length".to_owned(), serde_json::Value::Object(by_length));
    obj.insert(
        "state".to_owned(),
        serde_json::Value::String(summary.state.as_str().to_owned()),
    );
    obj.insert(
        "stats".to_owned(),
        serde_json::to_value(summary.stats).map_err(std::io::Error::other)?,
    );
    write_json(w, &serde_json::Value::Object(obj))
}
