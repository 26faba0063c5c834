//! Writes a generated graph to stdout as an edge list.
//!
//! Usage: `gen-edges [small|medium|large] [seed]`. The output is accepted
//! by `chordless cycles -`, which makes the tiers usable for end-to-end
//! timing of the CLI.

use std::error::Error;
use std::io::{BufWriter, Write as _};

use chordless_bench::{SizeTier, generate_graph};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let tier = match args.next().as_deref() {
        None | Some("small") => SizeTier::Small,
        Some("medium") => SizeTier::Medium,
        Some("large") => SizeTier::Large,
        Some(other) => return Err(format!("unknown tier {other:?}").into()),
    };
    let seed: u64 = match args.next() {
        Some(seed) => seed.parse()?,
        None => 42,
    };

    let graph = generate_graph(&tier.config(seed));
    eprintln!(
        "Generated {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "# chordless-bench tier {} seed {seed}", tier.label())?;
    for (a, b) in graph.edges() {
        writeln!(out, "{a} {b}")?;
    }
    out.flush()?;
    Ok(())
}
