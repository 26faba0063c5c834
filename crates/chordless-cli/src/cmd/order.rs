//! Implementation of `chordless order <file>`.
//!
//! Prints the node order a sweep would process, shifted back by
//! `--first-node`. Human mode writes one id per line; JSON mode writes
//! `{"strategy": "...", "order": [...]}`.
use chordless_core::OrderStrategy;

use crate::OutputFormat;
use crate::cli::{GraphArgs, OrderArgs};
use crate::cmd::{load_graph, node_order, write_json};
use crate::error::CliError;

/// Runs the `order` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be read or parsed.
/// - [`CliError`] exit code 1 if stdout cannot be written.
pub fn run(
    graph_args: &GraphArgs,
    order_args: &OrderArgs,
    format: OutputFormat,
    max_size: u64,
) -> Result<(), CliError> {
    let graph = load_graph(graph_args, max_size)?;
    let order: Vec<usize> = node_order(&graph, order_args)
        .as_slice()
        .iter()
        .map(|&node| node + graph_args.first_node)
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &order),
        OutputFormat::Json => print_json(&mut out, order_args.order.into(), &order),
    }
    .map_err(|e| CliError::output(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, order: &[usize]) -> std::io::Result<()> {
    for node in order {
        writeln!(w, "{node}")?;
    }
    Ok(())
}

fn print_json<W: std::io::Write>(
    w: &mut W,
    strategy: OrderStrategy,
    order: &[usize],
) -> std::io::Result<()> {
    let mut obj = serde_json::Map::new();
    obj.insert(
        "strategy".to_owned(),
        serde_json::to_value(strategy).map_err(std::io::Error::other)?,
    );
    obj.insert(
        "order".to_owned(),
        serde_json::Value::Array(
            order
                .iter()
                .map(|&node| serde_json::Value::Number(node.into()))
                .collect(),
        ),
    );
    write_json(w, &serde_json::Value::Object(obj))
}
