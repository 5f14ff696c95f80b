//! Criterion benchmarks for the roadside decoration policy.
//!
//! Benchmarks:
//!   - one tick with a full window of active decorations (retire + place)
//!   - a long drive of 10k ticks through the builtin catalog
//!
//! Run with: cargo bench -p scenery --bench roadside_bench

use bevy::math::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use scenery::catalog::DecorationCatalogDef;
use scenery::config::RoadsideConfig;
use scenery::placement::Placement;
use scenery::roadside::{DecorationSink, LoadedAsset, RoadsideManager};

/// Sink that only counts; isolates the policy cost from any scene work.
#[derive(Default)]
struct CountingSink {
    next: u64,
    removed: u64,
}

impl DecorationSink for CountingSink {
    type Template = ();
    type Handle = u64;

    fn place(&mut self, _asset: &LoadedAsset<()>, placement: &Placement) -> u64 {
        black_box(placement);
        self.next += 1;
        self.next
    }

    fn remove(&mut self, _handle: u64) {
        self.removed += 1;
    }
}

fn builtin_catalog() -> Vec<LoadedAsset<()>> {
    DecorationCatalogDef::builtin()
        .expect("builtin catalog")
        .entries
        .into_iter()
        .map(|entry| LoadedAsset { entry, template: () })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmark: single tick
// ---------------------------------------------------------------------------

fn bench_single_tick(c: &mut Criterion) {
    let catalog = builtin_catalog();
    let config = RoadsideConfig::default();

    c.bench_function("roadside_tick_full_window", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut sink = CountingSink::default();
        let mut manager = RoadsideManager::new();
        let mut progress = 0u64;
        b.iter(|| {
            progress += config.placement_interval;
            black_box(manager.tick(
                black_box(progress),
                Vec3::ZERO,
                &config,
                &catalog,
                &mut rng,
                &mut sink,
            ))
        });
    });
}

// ---------------------------------------------------------------------------
// Benchmark: long drive
// ---------------------------------------------------------------------------

fn bench_long_drive(c: &mut Criterion) {
    let catalog = builtin_catalog();
    let config = RoadsideConfig::default();

    c.bench_function("roadside_drive_10k_ticks", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let mut sink = CountingSink::default();
            let mut manager = RoadsideManager::new();
            for progress in 0..10_000u64 {
                manager.tick(progress, Vec3::ZERO, &config, &catalog, &mut rng, &mut sink);
            }
            black_box(sink.removed)
        });
    });
}

criterion_group!(benches, bench_single_tick, bench_long_drive);
criterion_main!(benches);
