//! Benchmark for visibility queries.
//!
//! TARGET: 16 viewers (polygon + 15 occlusion checks each) well inside one
//! 50 ms server tick
//!
//! Run with: cargo bench --package umbra_vision --bench raycast_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use umbra_procedural::{MapSeed, MazeConfig, MazeGenerator};
use umbra_shared::{Team, Vec2, VISION_RADIUS};
use umbra_vision::{compute_polygon, wall_segments, DiscoveredGrid, VisionEngine};

fn setup() -> (umbra_shared::MapData, VisionEngine) {
    let map = MazeGenerator::new(MazeConfig::default())
        .expect("default config is valid")
        .generate_seeded(MapSeed::new(42));
    let mut engine = VisionEngine::new();
    engine.publish_map(&map);
    (map, engine)
}

fn benchmark_polygon(c: &mut Criterion) {
    let (map, engine) = setup();
    let viewer = Vec2::new(map.width / 2.0, map.height / 2.0);

    c.bench_function("polygon_indexed", |b| {
        b.iter(|| black_box(engine.compute_polygon(black_box(viewer), VISION_RADIUS)));
    });

    let all = wall_segments(&map);
    c.bench_function("polygon_brute_force", |b| {
        b.iter(|| black_box(compute_polygon(black_box(viewer), VISION_RADIUS, &all)));
    });
}

fn benchmark_full_tick(c: &mut Criterion) {
    let (map, engine) = setup();
    let mut rng = MapSeed::new(7).rng();
    let viewers: Vec<Vec2> = (0..16)
        .map(|i| map.spawn_point(if i % 2 == 0 { Team::Red } else { Team::Blue }, &mut rng))
        .collect();

    let mut group = c.benchmark_group("tick");
    group.throughput(Throughput::Elements(viewers.len() as u64));
    group.bench_function("16_viewers", |b| {
        b.iter(|| {
            for &viewer in &viewers {
                black_box(engine.compute_polygon(viewer, VISION_RADIUS));
                for &other in &viewers {
                    black_box(engine.is_visible(viewer, other, VISION_RADIUS));
                }
            }
        });
    });
    group.finish();
}

fn benchmark_discovery(c: &mut Criterion) {
    let (map, _) = setup();
    let mut grid = DiscoveredGrid::for_map(&map, Team::Red, 1);
    let mut x = 0.0f32;

    c.bench_function("discovery_update", |b| {
        b.iter(|| {
            x = (x + 7.0) % map.width;
            black_box(grid.update(Vec2::new(x, map.height / 2.0), VISION_RADIUS))
        });
    });
}

criterion_group!(benches, benchmark_polygon, benchmark_full_tick, benchmark_discovery);
criterion_main!(benches);
