//! Culling: drawn tiles match a full scan with the exact visibility test.

use mapgen::{MapConfig, MapRng};

use super::{view, FakeMap};
use crate::test_backend::{FakeLoader, RecordingTarget};
use crate::tile_map::TileMap;
use crate::viewport::{is_tile_visible, FrameView};

fn generated_map(width: usize, height: usize, tile_size: f32) -> FakeMap {
    let config = MapConfig::new(width, height, tile_size, 2024);
    let mut rng = MapRng::from_seed_u64(config.seed);
    TileMap::new(&config, &mut rng.0, &mut FakeLoader::new()).expect("builds")
}

/// Tile coordinates of every terrain draw, recovered from destinations.
fn drawn_tiles(map: &FakeMap, v: &FrameView) -> Vec<(usize, usize)> {
    let mut target = RecordingTarget::new();
    map.draw_terrain(&mut target, v);
    target
        .draws()
        .map(|(_, dest, _)| {
            let x = ((dest.x + v.camera.x) / map.tile_size()).round() as usize;
            let y = ((dest.y + v.camera.y) / map.tile_size()).round() as usize;
            (x, y)
        })
        .collect()
}

fn brute_force(map: &FakeMap, v: &FrameView) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            if is_tile_visible(x, y, map.tile_size(), v) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn test_bounded_walk_matches_full_scan() {
    let map = generated_map(40, 30, 32.0);
    let views = [
        view((0.0, 0.0), (320.0, 320.0), 1.0),
        view((100.0, 37.5), (640.0, 480.0), 1.0),
        view((-50.0, -50.0), (300.0, 200.0), 1.0),
        view((1000.0, 700.0), (800.0, 600.0), 1.0),
        view((200.0, 200.0), (800.0, 600.0), 2.5),
        view((64.0, 64.0), (800.0, 600.0), 0.3),
        view((31.9, 32.1), (123.0, 77.0), 1.7),
        view((0.0, 0.0), (320.0, 320.0), 0.0),
    ];
    for v in &views {
        assert_eq!(drawn_tiles(&map, v), brute_force(&map, v), "view {v:?}");
    }
}

#[test]
fn test_edge_tile_drawn_next_tile_culled() {
    let map = generated_map(20, 20, 32.0);
    let v = view((0.0, 0.0), (320.0, 320.0), 1.0);
    let tiles = drawn_tiles(&map, &v);
    assert!(tiles.contains(&(10, 10)));
    assert!(!tiles.contains(&(11, 11)));
    assert!(!tiles.contains(&(11, 0)));
    // Columns and rows 0..=10 inclusive.
    assert_eq!(tiles.len(), 11 * 11);
}

#[test]
fn test_view_off_map_draws_nothing() {
    let map = generated_map(10, 10, 32.0);
    let mut target = RecordingTarget::new();
    let stats = map.draw(&mut target, &view((-2000.0, -2000.0), (320.0, 320.0), 1.0));
    assert_eq!(stats.terrain_tiles + stats.prop_tiles, 0);
    assert!(target.calls.is_empty());
}

#[test]
fn test_view_covering_map_draws_every_tile_once() {
    let map = generated_map(12, 9, 16.0);
    let tiles = drawn_tiles(&map, &view((-100.0, -100.0), (4000.0, 4000.0), 1.0));
    assert_eq!(tiles.len(), 12 * 9);
    let mut sorted = tiles.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), tiles.len());
}
