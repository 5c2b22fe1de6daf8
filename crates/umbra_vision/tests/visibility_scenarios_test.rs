//! # Visibility Scenario Tests
//!
//! Fog-of-war guarantees checked against hand-built walls and generated
//! maps: radius cutoff, open sight, blocking, ward override, discovery.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use umbra_procedural::{MapSeed, MazeConfig, MazeGenerator};
use umbra_shared::{MapData, Team, Vec2};
use umbra_vision::{
    compute_polygon, is_visible, wall_segments, DiscoveredGrid, SegmentIndex, VisionEngine, VisionMask,
    WallSegment, Ward,
};

fn generated_map(seed: u64) -> MapData {
    MazeGenerator::new(MazeConfig::default())
        .unwrap()
        .generate_seeded(MapSeed::new(seed))
}

fn random_point<R: Rng>(rng: &mut R, map: &MapData) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..map.width), rng.gen_range(0.0..map.height))
}

/// Test: The worked example: one wall at x = 2 between y = 0 and y = 5.
#[test]
fn test_single_wall_scenario() {
    let wall = WallSegment::new(Vec2::new(2.0, 0.0), Vec2::new(2.0, 5.0));
    let origin = Vec2::new(0.0, 2.0);
    let radius = 10.0;

    let polygon = compute_polygon(origin, radius, &[wall]);

    // the +x ray stops on the wall
    let east = polygon
        .points
        .iter()
        .find(|p| (p.y - origin.y).abs() < 1e-4 && p.x > origin.x)
        .expect("polygon has an eastward point");
    assert!((east.x - 2.0).abs() < 1e-4, "east ray reached {east:?}");

    // rays that miss the wall reach the full radius
    let west = polygon
        .points
        .iter()
        .find(|p| (p.y - origin.y).abs() < 1e-4 && p.x < origin.x)
        .expect("polygon has a westward point");
    assert!((west.distance(origin) - radius).abs() < 1e-3);

    for point in &polygon.points {
        let d = point.distance(origin);
        assert!(d <= radius + 1e-3);
        let crosses_wall = point.x > 2.0 + 1e-4 && {
            let y_at_wall = origin.y + (point.y - origin.y) * (2.0 - origin.x) / (point.x - origin.x);
            // corner rays may graze the endpoints
            (1e-3..=5.0 - 1e-3).contains(&y_at_wall)
        };
        assert!(!crosses_wall, "ray passed through the wall to {point:?}");
    }

    assert!(!is_visible(origin, Vec2::new(4.0, 2.0), radius, &[wall]));
    assert!(is_visible(origin, Vec2::new(1.0, 2.0), radius, &[wall]));
}

/// Test: Nothing beyond the radius is ever visible.
#[test]
fn test_radius_cutoff_on_generated_map() {
    let map = generated_map(1);
    let segments = wall_segments(&map);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let radius = 96.0;

    for _ in 0..500 {
        let origin = random_point(&mut rng, &map);
        let target = random_point(&mut rng, &map);
        if origin.distance(target) > radius {
            assert!(!is_visible(origin, target, radius, &segments));
            assert!(!is_visible(origin, target, radius, &[]));
        }
    }
}

/// Test: With no walls, everything in range is visible.
#[test]
fn test_unobstructed_line_of_sight() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let radius = 200.0;
    for _ in 0..500 {
        let origin = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let target = origin + Vec2::from_angle(angle) * rng.gen_range(0.0..radius);
        assert!(is_visible(origin, target, radius, &[]));
    }
}

/// Test: A wall between viewer and target always blocks.
#[test]
fn test_single_blocking_wall() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for _ in 0..200 {
        let origin = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let direction = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU));
        let target_distance = rng.gen_range(20.0..150.0);
        let wall_distance = rng.gen_range(5.0..target_distance - 5.0);

        // wall perpendicular to the sight line, centred on it
        let normal = Vec2::new(-direction.y, direction.x);
        let center = origin + direction * wall_distance;
        let wall = WallSegment::new(center + normal * 10.0, center - normal * 10.0);
        let target = origin + direction * target_distance;

        assert!(!is_visible(origin, target, 150.0, &[wall]));
    }
}

/// Test: An allied ward reveals a target hidden behind walls.
#[test]
fn test_ward_override() {
    let map = generated_map(3);
    let mut engine = VisionEngine::new();
    engine.publish_map(&map);
    let index = SegmentIndex::from_map(&map);
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    let mut checked = 0;
    while checked < 50 {
        let viewer = random_point(&mut rng, &map);
        let target = viewer + Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU)) * 150.0;
        if engine.is_visible(viewer, target, 192.0) {
            continue;
        }
        checked += 1;

        let nearby = index.query_circle(viewer, 192.0);
        let ward = Ward::new(target + Vec2::new(10.0, 0.0), 64.0, Team::Red);
        let enemy_ward = Ward { team: Team::Blue, ..ward };

        assert!(engine.sees_with_wards(viewer, 192.0, Team::Red, &[ward], target));
        assert!(VisionMask::for_viewer(viewer, 192.0, Team::Red, &[ward]).reveals(target, &nearby));
        assert!(!engine.sees_with_wards(viewer, 192.0, Team::Red, &[enemy_ward], target));
    }
}

/// Test: The engine agrees with the brute-force query over all segments.
#[test]
fn test_index_matches_brute_force() {
    let map = generated_map(4);
    let all = wall_segments(&map);
    let mut engine = VisionEngine::new();
    engine.publish_map(&map);
    let mut rng = ChaCha8Rng::seed_from_u64(23);

    for _ in 0..300 {
        let origin = random_point(&mut rng, &map);
        let target = origin + Vec2::new(rng.gen_range(-150.0..150.0), rng.gen_range(-150.0..150.0));
        assert_eq!(
            engine.is_visible(origin, target, 192.0),
            is_visible(origin, target, 192.0, &all),
            "origin {origin:?} target {target:?}"
        );
    }
}

/// Test: Polygons on a generated map stay inside the radius.
#[test]
fn test_polygon_bounded_on_generated_map() {
    let map = generated_map(6);
    let mut engine = VisionEngine::new();
    engine.publish_map(&map);
    let spawn = map.spawn_point(Team::Red, &mut ChaCha8Rng::seed_from_u64(1));

    let polygon = engine.compute_polygon(spawn, 192.0);
    assert!(polygon.len() > 90);
    assert!(polygon.points.iter().all(|p| p.distance(spawn) <= 192.0 + 1e-2));
    assert!(polygon.contains(spawn));
    println!("Polygon points: {}, area: {:.0}", polygon.len(), polygon.area());
}

/// Test: Without a published wall set the viewer sees nothing.
#[test]
fn test_missing_wall_cache() {
    let engine = VisionEngine::new();
    let viewer = Vec2::new(300.0, 300.0);
    assert!(engine.compute_polygon(viewer, 192.0).is_empty());
    assert!(!engine.is_visible(viewer, Vec2::new(310.0, 300.0), 192.0));
}

/// Test: Discovered tiles never revert.
#[test]
fn test_discovery_monotonicity() {
    let map = generated_map(2);
    let mut grid = DiscoveredGrid::for_map(&map, Team::Blue, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut previous: Vec<Vec<bool>> = grid.rows().map(<[bool]>::to_vec).collect();
    let mut total_new = 0;

    for _ in 0..200 {
        let position = random_point(&mut rng, &map);
        let before = grid.discovered_count();
        let newly = grid.update(position, rng.gen_range(0.0..200.0));
        assert_eq!(grid.discovered_count(), before + newly);
        total_new += newly;

        let current: Vec<Vec<bool>> = grid.rows().map(<[bool]>::to_vec).collect();
        for (old_row, new_row) in previous.iter().zip(&current) {
            for (&was, &is) in old_row.iter().zip(new_row) {
                assert!(!was || is, "a discovered tile was forgotten");
            }
        }
        previous = current;
    }

    println!("Explored {:.1}% after 200 updates ({total_new} new tiles)", grid.explored_fraction() * 100.0);
    assert!(total_new > 0);
}

/// Test: Each team starts with its own strip revealed and the enemy's hidden.
#[test]
fn test_home_strip_revealed() {
    let map = generated_map(2);
    let red = DiscoveredGrid::for_map(&map, Team::Red, 1);
    let last_col = map.width_tiles() as i32 - 1;

    for row in 0..map.height_tiles() as i32 {
        assert!(red.is_discovered(0, row));
        assert!(red.is_discovered(4, row), "one buffer column past the strip");
        assert!(!red.is_discovered(last_col, row));
    }
}
