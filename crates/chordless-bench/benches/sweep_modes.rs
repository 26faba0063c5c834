//! Group 1: destructive vs constructive sweep, with and without bridge
//! pruning.
#![allow(clippy::expect_used)]

use chordless_bench::{SizeTier, generate_graph};
use chordless_core::{ChordlessCycles, EnumerationConfig, SweepMode, prune_bridges};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_sweep_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_modes");
    group.sample_size(20);

    for tier in SizeTier::ALL {
        let graph = generate_graph(&tier.config(42));
        for mode in SweepMode::ALL {
            let config = EnumerationConfig {
                mode,
                ..EnumerationConfig::default()
            };
            group.bench_function(BenchmarkId::new(mode.as_str(), tier.label()), |b| {
                b.iter(|| {
                    let mut count = 0usize;
                    ChordlessCycles::new(&graph, config)
                        .for_each_cycle(|_| count += 1)
                        .run();
                    count
                });
            });
        }
    }
    group.finish();
}

fn bench_bridge_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("bridge_pruning");
    group.sample_size(20);

    for tier in SizeTier::ALL {
        let graph = generate_graph(&tier.config(42));

        group.bench_function(BenchmarkId::new("prune_only", tier.label()), |b| {
            b.iter(|| prune_bridges(&graph));
        });

        group.bench_function(BenchmarkId::new("prune_then_enumerate", tier.label()), |b| {
            b.iter(|| {
                let pruned = prune_bridges(&graph);
                let mut count = 0usize;
                ChordlessCycles::new(&pruned, EnumerationConfig::default())
                    .for_each_cycle(|_| count += 1)
                    .run();
                count
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep_modes, bench_bridge_pruning);
criterion_main!(benches);
