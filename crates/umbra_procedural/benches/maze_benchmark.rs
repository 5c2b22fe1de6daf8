//! Benchmark for maze generation.
//!
//! TARGET: a default-sized map well inside one 50 ms server tick
//!
//! Run with: cargo bench --package umbra_procedural --bench maze_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use umbra_procedural::{MapSeed, MazeConfig, MazeGenerator, MazeGrid};

fn benchmark_default_map(c: &mut Criterion) {
    let generator = MazeGenerator::new(MazeConfig::default()).expect("default config is valid");

    c.bench_function("generate_default_map", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            black_box(generator.generate_seeded(MapSeed::new(black_box(seed))))
        });
    });
}

fn benchmark_spanning_tree(c: &mut Criterion) {
    let generator = MazeGenerator::new(MazeConfig::default()).expect("default config is valid");
    let geometry = *generator.geometry();

    let mut group = c.benchmark_group("spanning_tree");
    group.throughput(Throughput::Elements((geometry.grid_width * geometry.grid_height) as u64));

    group.bench_function("carve_default_grid", |b| {
        let mut rng = MapSeed::new(42).rng();
        b.iter(|| {
            let mut grid = MazeGrid::new(geometry.grid_width, geometry.grid_height);
            black_box(generator.carve_spanning_tree(&mut grid, &mut rng))
        });
    });

    group.finish();
}

fn benchmark_large_map(c: &mut Criterion) {
    let config = MazeConfig {
        map_width_tiles: 256,
        map_height_tiles: 160,
        plaza_size_tiles: 12,
        ..MazeConfig::default()
    };
    let generator = MazeGenerator::new(config).expect("large config is valid");

    let mut group = c.benchmark_group("large_map");
    group.sample_size(20);
    group.bench_function("generate_256x160", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            black_box(generator.generate_seeded(MapSeed::new(seed)))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_default_map,
    benchmark_spanning_tree,
    benchmark_large_map,
);
criterion_main!(benches);
