//! Tests that generated graphs are deterministic and have the intended shape.
#![allow(clippy::expect_used)]

use chordless_bench::{GeneratorConfig, SizeTier, generate_graph};
use chordless_core::bridges;

#[test]
fn generation_is_deterministic() {
    for tier in SizeTier::ALL {
        let a = generate_graph(&tier.config(42));
        let b = generate_graph(&tier.config(42));
        assert!(a.edges().eq(b.edges()), "{tier:?}");
    }
}

#[test]
fn seeds_change_the_random_parts() {
    let a = generate_graph(&SizeTier::Medium.config(1));
    let b = generate_graph(&SizeTier::Medium.config(2));
    assert_eq!(a.node_count(), b.node_count());
    assert!(!a.edges().eq(b.edges()));
}

#[test]
fn tiers_grow() {
    let sizes: Vec<usize> = SizeTier::ALL
        .iter()
        .map(|tier| generate_graph(&tier.config(42)).node_count())
        .collect();
    assert!(sizes.windows(2).all(|w| w[0] < w[1]), "{sizes:?}");
}

#[test]
fn components_are_joined_by_bridges() {
    let config = SizeTier::Small.config(42);
    let graph = generate_graph(&config);
    // Random core, grid, wheel, then one component per ring.
    let components = 3 + config.rings;
    assert!(bridges(&graph).len() >= components - 1);
}

#[test]
fn wheel_only_config() {
    let config = GeneratorConfig {
        seed: 0,
        random_nodes: 0,
        edge_probability: 0.0,
        grid_rows: 0,
        grid_cols: 0,
        wheel_rim: 5,
        rings: 0,
        ring_len: 0,
        chords_per_ring: 0,
    };
    let graph = generate_graph(&config);
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 10);
    assert!(bridges(&graph).is_empty());
}
