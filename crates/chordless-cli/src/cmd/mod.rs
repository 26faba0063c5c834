/// Command module for the `chordless` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod cycles;
pub mod order;
pub mod summary;

use chordless_core::{
    ChordlessCycles, CycleGraph, EdgeListOptions, NodeOrder, OrderStrategy, parse_edge_list,
    prune_bridges,
};

use crate::cli::{EnumerateArgs, GraphArgs, OrderArgs};
use crate::error::CliError;
use crate::io::read_input;

/// Reads and parses the input graph, pruning bridges if requested.
pub fn load_graph(args: &GraphArgs, max_size: u64) -> Result<CycleGraph, CliError> {
    let label = args.file.label();
    let text = read_input(&args.file, max_size)?;
    let options = EdgeListOptions {
        first_node: args.first_node,
        max_nodes: args.max_nodes,
    };
    let graph = parse_edge_list(&text, &options).map_err(|error| CliError::ParseError {
        source: label.clone(),
        error,
    })?;
    log::info!(
        "loaded {label}: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    if !args.prune_bridges {
        return Ok(graph);
    }
    let pruned = prune_bridges(&graph);
    log::info!(
        "pruned {} bridges",
        graph.edge_count() - pruned.edge_count()
    );
    Ok(pruned)
}

/// Computes the node order selected by `args`.
pub fn node_order(graph: &CycleGraph, args: &OrderArgs) -> NodeOrder {
    OrderStrategy::from(args.order).order(graph, args.seed)
}

/// Builds a collecting enumerator for `args` over `graph`.
pub fn enumerator<'g, 'cb>(
    graph: &'g CycleGraph,
    args: &EnumerateArgs,
) -> ChordlessCycles<'g, 'cb> {
    ChordlessCycles::with_node_order(graph, node_order(graph, &args.order), args.config())
}

/// Pretty-prints `value` followed by a newline.
pub fn write_json<W: std::io::Write>(w: &mut W, value: &serde_json::Value) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}
