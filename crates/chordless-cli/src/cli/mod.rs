//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use chordless_core::{EnumerationConfig, MAX_NODES, OrderStrategy, SearchLevel, SweepMode};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            PathOrStdin::Stdin => "-".to_owned(),
            PathOrStdin::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default).
    Human,
    /// A single JSON object on stdout.
    Json,
}

/// Sweep direction.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    /// Remove each node after processing it (default).
    Destructive,
    /// Insert nodes one at a time into an empty graph.
    Constructive,
}

impl From<Mode> for SweepMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Destructive => SweepMode::Destructive,
            Mode::Constructive => SweepMode::Constructive,
        }
    }
}

/// Search optimization level.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Level {
    /// Reachability check before every extension.
    Exhaustive,
    /// Follow shortest witness paths.
    Witness,
    /// Witness paths plus reachability marks (default).
    Marked,
}

impl From<Level> for SearchLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Exhaustive => SearchLevel::Exhaustive,
            Level::Witness => SearchLevel::Witness,
            Level::Marked => SearchLevel::Marked,
        }
    }
}

/// Node order heuristic.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Order {
    /// Ascending node id (default).
    Natural,
    /// Descending node id.
    Reversed,
    /// Seeded shuffle; see `--seed`.
    Random,
    /// Minimum remaining degree first (degeneracy order).
    SmallestFirst,
    /// Maximum remaining degree first.
    LargestFirst,
    /// Lowest PageRank first.
    PageRank,
    /// Lowest betweenness centrality first. Quadratic; slow on large graphs.
    Betweenness,
}

impl From<Order> for OrderStrategy {
    fn from(order: Order) -> Self {
        match order {
            Order::Natural => OrderStrategy::Natural,
            Order::Reversed => OrderStrategy::Reversed,
            Order::Random => OrderStrategy::Random,
            Order::SmallestFirst => OrderStrategy::SmallestFirst,
            Order::LargestFirst => OrderStrategy::LargestFirst,
            Order::PageRank => OrderStrategy::PageRank,
            Order::Betweenness => OrderStrategy::Betweenness,
        }
    }
}

/// Input options shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct GraphArgs {
    /// Path to an edge-list file, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub file: PathOrStdin,

    /// Smallest node id used in the file (use 1 for 1-based files).
    #[arg(long, default_value = "0")]
    pub first_node: usize,

    /// Reject inputs whose largest node id needs more than N nodes.
    #[arg(long, value_name = "N", default_value_t = MAX_NODES)]
    pub max_nodes: usize,

    /// Remove bridges before enumerating. Does not change the result.
    #[arg(long)]
    pub prune_bridges: bool,
}

/// Node order options.
#[derive(Args, Clone, Debug)]
pub struct OrderArgs {
    /// Node order heuristic.
    #[arg(long, default_value = "natural", value_enum)]
    pub order: Order,

    /// Seed for `--order random`.
    #[arg(long, default_value = "0")]
    pub seed: u64,
}

/// Enumeration options shared by `cycles` and `summary`.
#[derive(Args, Clone, Debug)]
pub struct EnumerateArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub order: OrderArgs,

    /// Sweep mode.
    #[arg(long, default_value = "destructive", value_enum)]
    pub mode: Mode,

    /// Search optimization level.
    #[arg(long, default_value = "marked", value_enum)]
    pub level: Level,

    /// Stop after this many cycles.
    #[arg(long, value_name = "N")]
    pub max_cycles: Option<usize>,
}

impl EnumerateArgs {
    /// Builds the core configuration from the parsed flags.
    pub fn config(&self) -> EnumerationConfig {
        EnumerationConfig {
            max_cycles: self.max_cycles,
            mode: self.mode.into(),
            level: self.level.into(),
        }
    }
}

/// All top-level subcommands exposed by the `chordless` binary.
#[derive(Subcommand)]
pub enum Command {
    /// List every chordless cycle of a graph.
    Cycles(EnumerateArgs),

    /// Print cycle counts, a length histogram, and search statistics.
    Summary(EnumerateArgs),

    /// Print the node order a sweep would use.
    Order {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        order: OrderArgs,
    },
}

/// Root CLI struct for the `chordless` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "chordless",
    version,
    about = "Chordless cycle enumeration",
    long_about = "Enumerates the chordless (induced) cycles of an undirected graph\n\
                  read from a whitespace-separated edge list."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors to stderr (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log run details to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `CHORDLESS_MAX_FILE_SIZE` environment
    /// variable. The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "CHORDLESS_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,
}

impl Cli {
    /// Default log filter implied by `--quiet` / `--verbose`. `RUST_LOG`
    /// overrides it.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
