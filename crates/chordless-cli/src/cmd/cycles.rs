//! Implementation of `chordless cycles <file>`.
//!
//! Human mode streams one cycle per line as it is found, node ids separated
//! by spaces and shifted back by `--first-node`. JSON mode collects the run
//! and prints `{"cycles": [...], "count": N, "state": "...", "stats": {...}}`.
use std::io::Write as _;
use std::ops::ControlFlow;

use chordless_core::{RunStats, SweepState};

use crate::OutputFormat;
use crate::cli::EnumerateArgs;
use crate::cmd::{enumerator, load_graph, write_json};
use crate::error::CliError;

/// Runs the `cycles` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be read or parsed.
/// - [`CliError`] exit code 1 if stdout cannot be written.
pub fn run(args: &EnumerateArgs, format: OutputFormat, max_size: u64) -> Result<(), CliError> {
    let graph = load_graph(&args.graph, max_size)?;
    let offset = args.graph.first_node;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => {
            let mut write_error = None;
            let mut cycles = enumerator(&graph, args).with_callback(|cycle| {
                match write_cycle(&mut out, cycle, offset) {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(e) => {
                        write_error = Some(e);
                        ControlFlow::Break(())
                    }
                }
            });
            let state = cycles.run();
            let stats = *cycles.stats();
            drop(cycles);

            if let Some(e) = write_error {
                return Err(CliError::output(&e));
            }
            out.flush().map_err(|e| CliError::output(&e))?;
            report(state, &stats);
        }
        OutputFormat::Json => {
            let mut cycles = enumerator(&graph, args);
            let state = cycles.run();
            let stats = *cycles.stats();
            let found = cycles.into_cycles().unwrap_or_default();
            print_json(&mut out, &found, offset, state, &stats)
                .map_err(|e| CliError::output(&e))?;
            report(state, &stats);
        }
    }
    Ok(())
}

fn report(state: SweepState, stats: &RunStats) {
    if state == SweepState::Capped {
        log::warn!("stopped at the cycle cap after {} cycles", stats.cycles);
    }
    log::info!("{stats}");
}

fn write_cycle<W: std::io::Write>(w: &mut W, cycle: &[usize], offset: usize) -> std::io::Result<()> {
    let mut first = true;
    for &node in cycle {
        if !first {
            w.write_all(b" ")?;
        }
        write!(w, "{}", node + offset)?;
        first = false;
    }
    writeln!(w)
}

fn print_json<W: std::io::Write>(
    w: &mut W,
    cycles: &[Vec<usize>],
    offset: usize,
    state: SweepState,
    stats: &RunStats,
) -> std::io::Result<()> {
    let cycles_array: Vec<serde_json::Value> = cycles
        .iter()
        .map(|cycle| {
            serde_json::Value::Array(
                cycle
                    .iter()
                    .map(|&node| serde_json::Value::Number((node + offset).into()))
                    .collect(),
            )
        })
        .collect();

    let mut obj = serde_json::Map::new();
    obj.insert(
        "count".to_owned(),
        serde_json::Value::Number(cycles.len().into()),
    );
    obj.insert("cycles".to_owned(), serde_json::Value::Array(cycles_array));
    obj.insert(
        "state".to_owned(),
        serde_json::Value::String(state.as_str().to_owned()),
    );
    obj.insert(
        "stats".to_owned(),
        serde_json::to_value(stats).map_err(std::io::Error::other)?,
    );
    write_json(w, &serde_json::Value::Object(obj))
}
