//! Composite graph generator.
//!
//! A generated graph is a set of independent components laid side by side
//! and chained together by bridge edges:
//!
//! - a G(n, p) random core, dense in short chordless cycles,
//! - a rectangular grid, whose chordless cycles grow long and numerous,
//! - a wheel, one long rim cycle plus a fan of triangles,
//! - a row of rings carrying a few random chords each.
//!
//! The bridges lie on no cycle, so the cycle set is the union of the
//! components' cycle sets and bridge pruning has real work to do.

pub mod topology;

use chordless_core::CycleGraph;
use rand::SeedableRng;
use rand::rngs::StdRng;

use topology::Builder;

/// Configuration for the graph generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Nodes in the G(n, p) core.
    pub random_nodes: usize,
    /// Edge probability of the G(n, p) core.
    pub edge_probability: f64,
    /// Grid rows (0 for no grid).
    pub grid_rows: usize,
    /// Grid columns (0 for no grid).
    pub grid_cols: usize,
    /// Rim length of the wheel (0 for no wheel).
    pub wheel_rim: usize,
    /// Number of rings.
    pub rings: usize,
    /// Nodes per ring.
    pub ring_len: usize,
    /// Random chords added to each ring.
    pub chords_per_ring: usize,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~80 nodes, a few hundred cycles
    Small,
    /// ~300 nodes, a few thousand cycles
    Medium,
    /// ~1200 nodes, tens of thousands of cycles
    Large,
}

impl SizeTier {
    /// All tiers, smallest first.
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    /// Short label for benchmark ids.
    pub fn label(self) -> &'static str {
        match self {
            SizeTier::Small => "S",
            SizeTier::Medium => "M",
            SizeTier::Large => "L",
        }
    }

    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                random_nodes: 14,
                edge_probability: 0.25,
                grid_rows: 3,
                grid_cols: 4,
                wheel_rim: 8,
                rings: 6,
                ring_len: 7,
                chords_per_ring: 1,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                random_nodes: 20,
                edge_probability: 0.2,
                grid_rows: 4,
                grid_cols: 5,
                wheel_rim: 24,
                rings: 24,
                ring_len: 9,
                chords_per_ring: 2,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                random_nodes: 28,
                edge_probability: 0.15,
                grid_rows: 5,
                grid_cols: 6,
                wheel_rim: 96,
                rings: 96,
                ring_len: 11,
                chords_per_ring: 2,
            },
        }
    }
}

/// Generates a graph from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_graph(config: &GeneratorConfig) -> CycleGraph {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut builder = Builder::default();

    builder.random(&mut rng, config.random_nodes, config.edge_probability);
    builder.grid(config.grid_rows, config.grid_cols);
    builder.wheel(config.wheel_rim);
    for _ in 0..config.rings {
        builder.ring(&mut rng, config.ring_len, config.chords_per_ring);
    }
    builder.finish()
}
