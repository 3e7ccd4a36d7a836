//! Frame draw order: terrain before props, grass wrapped in the program.

use bevy::math::Vec2;
use mapgen::MapConfig;

use super::{fake_map, layers_from_rows, view};
use crate::assets::RESOLUTION_UNIFORM;
use crate::error::MapError;
use crate::test_backend::{DrawCall, FakeLoader, RecordingTarget};
use crate::tile_map::{FrameStats, TileMap};
use crate::viewport::TileRect;

const WATER: &str = "textures/water.png";
const GRASS: &str = "textures/grass.png";
const FOREST: &str = "textures/forest.png";

fn rect(x: usize, y: usize) -> TileRect {
    TileRect {
        x: x as f32 * 32.0,
        y: y as f32 * 32.0,
        w: 32.0,
        h: 32.0,
    }
}

fn draw(texture: &str, x: usize, y: usize, program: Option<u32>) -> DrawCall {
    DrawCall::Draw {
        texture: texture.to_string(),
        dest: rect(x, y),
        program,
    }
}

fn small_map() -> super::FakeMap {
    let layers = layers_from_rows(
        &["~~~~", "~.g~", "~~~~"],
        &["....", "..F.", "...."],
    );
    fake_map(layers, 32.0)
}

#[test]
fn test_full_frame_call_sequence() {
    let map = small_map();
    let mut target = RecordingTarget::new();
    let stats = map.draw(&mut target, &view((0.0, 0.0), (320.0, 320.0), 1.0));

    let mut expected = Vec::new();
    for x in 0..4 {
        expected.push(draw(WATER, x, 0, None));
    }
    expected.push(draw(WATER, 0, 1, None));
    expected.push(draw(GRASS, 1, 1, None));
    expected.push(DrawCall::BindProgram(1));
    expected.push(DrawCall::SetUniform {
        program: 1,
        name: RESOLUTION_UNIFORM.to_string(),
        value: Vec2::new(320.0, 320.0),
    });
    expected.push(draw(GRASS, 2, 1, Some(1)));
    expected.push(DrawCall::UnbindProgram);
    expected.push(draw(WATER, 3, 1, None));
    for x in 0..4 {
        expected.push(draw(WATER, x, 2, None));
    }
    expected.push(draw(FOREST, 2, 1, None));

    assert_eq!(target.calls, expected);
    assert!(map.shader_error().is_none());
    assert_eq!(
        stats,
        FrameStats {
            terrain_tiles: 12,
            prop_tiles: 1,
            shaded_tiles: 1,
        }
    );
}

#[test]
fn test_every_prop_draw_follows_every_terrain_draw() {
    let mut rng = mapgen::MapRng::from_seed_u64(17);
    let mut loader = FakeLoader::new();
    let map = TileMap::new(&MapConfig::new(24, 18, 32.0, 17), &mut rng.0, &mut loader)
        .expect("map builds");
    let mut target = RecordingTarget::new();
    let stats = map.draw(&mut target, &view((0.0, 0.0), (2000.0, 2000.0), 1.0));

    let draws: Vec<_> = target.draws().map(|(tex, _, _)| tex.to_string()).collect();
    assert_eq!(draws.len(), stats.terrain_tiles + stats.prop_tiles);
    let (terrain, props) = draws.split_at(stats.terrain_tiles);
    assert!(terrain.iter().all(|t| t == WATER || t == GRASS));
    assert!(props.iter().all(|t| t != WATER && t != GRASS));
    assert!(stats.prop_tiles > 0, "seed 17 places at least one prop");
}

#[test]
fn test_shaded_draws_only_for_grass_and_always_bracketed() {
    let map = small_map();
    let mut target = RecordingTarget::new();
    map.draw_terrain(&mut target, &view((0.0, 0.0), (320.0, 320.0), 1.0));

    for (i, call) in target.calls.iter().enumerate() {
        if let DrawCall::Draw {
            program: Some(_), ..
        } = call
        {
            assert!(matches!(target.calls[i - 2], DrawCall::BindProgram(_)));
            assert!(matches!(target.calls[i - 1], DrawCall::SetUniform { .. }));
            assert_eq!(target.calls[i + 1], DrawCall::UnbindProgram);
        }
    }
}

#[test]
fn test_resolution_uniform_tracks_viewport_not_zoom() {
    let map = small_map();
    let mut target = RecordingTarget::new();
    map.draw_terrain(&mut target, &view((0.0, 0.0), (800.0, 600.0), 2.0));

    let values: Vec<Vec2> = target
        .calls
        .iter()
        .filter_map(|c| match c {
            DrawCall::SetUniform { name, value, .. } if name == RESOLUTION_UNIFORM => Some(*value),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![Vec2::new(800.0, 600.0)]);
}

#[test]
fn test_degraded_mode_draws_grass_unshaded() {
    let layers = layers_from_rows(&["~~~~", "~gg~", "~~~~"], &["....", "....", "...."]);
    let mut loader = FakeLoader::new().with_failing_compile();
    let map = TileMap::from_layers(layers, 32.0, &mut loader).expect("compile failure is not fatal");
    assert!(!map.has_grass_shader());
    assert!(matches!(map.shader_error(), Some(MapError::ShaderCompile(_))));

    let mut target = RecordingTarget::new();
    let stats = map.draw(&mut target, &view((0.0, 0.0), (320.0, 320.0), 1.0));

    assert_eq!(stats.shaded_tiles, 0);
    assert_eq!(stats.terrain_tiles, 12);
    assert!(target
        .calls
        .iter()
        .all(|c| matches!(c, DrawCall::Draw { program: None, .. })));
    let grass = target.draws().filter(|(tex, _, _)| *tex == GRASS).count();
    assert_eq!(grass, 2);
}

#[test]
fn test_camera_offset_shifts_destinations() {
    let map = small_map();
    let mut target = RecordingTarget::new();
    map.draw_props(&mut target, &view((16.0, 8.0), (320.0, 320.0), 1.0));

    let (tex, dest, _) = target.draws().next().expect("forest drawn");
    assert_eq!(tex, FOREST);
    assert_eq!(
        dest,
        TileRect {
            x: 48.0,
            y: 24.0,
            w: 32.0,
            h: 32.0
        }
    );
}

#[test]
fn test_zoom_keeps_tile_size_on_screen() {
    let map = small_map();
    let mut target = RecordingTarget::new();
    map.draw_terrain(&mut target, &view((0.0, 0.0), (320.0, 320.0), 3.0));
    assert!(target.draws().all(|(_, dest, _)| dest.w == 32.0 && dest.h == 32.0));
}

#[test]
fn test_empty_prop_layer_draws_nothing() {
    let layers = layers_from_rows(&["~~~", "~g~", "~~~"], &["...", "...", "..."]);
    let map = fake_map(layers, 32.0);
    let mut target = RecordingTarget::new();
    let stats = map.draw_props(&mut target, &view((0.0, 0.0), (320.0, 320.0), 1.0));
    assert_eq!(stats, FrameStats::default());
    assert!(target.calls.is_empty());
}
