//! Asset loading failures and handle release on drop.

use mapgen::{MapConfig, MapGenError, MapRng};

use super::layers_from_rows;
use crate::assets::{TextureSlot, ASSET_MANIFEST};
use crate::error::MapError;
use crate::test_backend::FakeLoader;
use crate::tile_map::TileMap;

fn tiny_layers() -> mapgen::MapLayers {
    layers_from_rows(&["~~~", "~g~", "~~~"], &["...", "...", "..."])
}

#[test]
fn test_missing_texture_fails_construction() {
    let mut loader = FakeLoader::new().with_missing("textures/rock_big.png");
    let result = TileMap::from_layers(tiny_layers(), 32.0, &mut loader);
    match result {
        Err(MapError::AssetUnavailable { path, .. }) => assert_eq!(path, "textures/rock_big.png"),
        Err(e) => panic!("unexpected error {e}"),
        Ok(_) => panic!("map built without a texture"),
    }
}

#[test]
fn test_textures_loaded_before_failure_are_released() {
    let mut loader = FakeLoader::new().with_missing("textures/flower1.png");
    let released = loader.released.clone();
    assert!(TileMap::from_layers(tiny_layers(), 32.0, &mut loader).is_err());

    // Grass, water, forest, both rocks were loaded and then dropped.
    assert_eq!(released.borrow().len(), 5);
}

#[test]
fn test_missing_shader_source_fails_construction() {
    let mut loader = FakeLoader::new().with_missing(ASSET_MANIFEST.fragment_shader);
    let err = TileMap::from_layers(tiny_layers(), 32.0, &mut loader)
        .err()
        .expect("missing shader is fatal");
    assert!(matches!(err, MapError::AssetUnavailable { ref path, .. } if path == ASSET_MANIFEST.fragment_shader));
}

#[test]
fn test_load_order_textures_then_shaders() {
    let mut loader = FakeLoader::new();
    let _map = TileMap::from_layers(tiny_layers(), 32.0, &mut loader).expect("loads");

    let mut expected: Vec<String> = TextureSlot::ALL
        .iter()
        .map(|&s| ASSET_MANIFEST.texture_path(s).to_string())
        .collect();
    expected.push(ASSET_MANIFEST.vertex_shader.to_string());
    expected.push(ASSET_MANIFEST.fragment_shader.to_string());
    assert_eq!(loader.loaded, expected);
}

#[test]
fn test_drop_releases_every_texture_and_the_program() {
    let mut loader = FakeLoader::new();
    let released = loader.released.clone();
    let map = TileMap::from_layers(tiny_layers(), 32.0, &mut loader).expect("loads");
    assert!(released.borrow().is_empty());

    drop(map);

    let log = released.borrow();
    assert_eq!(log.len(), TextureSlot::COUNT + 1);
    for slot in TextureSlot::ALL {
        let entry = format!("texture {}", ASSET_MANIFEST.texture_path(slot));
        assert_eq!(log.iter().filter(|e| **e == entry).count(), 1, "{entry}");
    }
    assert_eq!(log.iter().filter(|e| *e == "program 1").count(), 1);
}

#[test]
fn test_drop_in_degraded_mode_releases_textures_only() {
    let mut loader = FakeLoader::new().with_failing_compile();
    let released = loader.released.clone();
    drop(TileMap::from_layers(tiny_layers(), 32.0, &mut loader).expect("loads"));
    let log = released.borrow();
    assert_eq!(log.len(), TextureSlot::COUNT);
    assert!(log.iter().all(|e| e.starts_with("texture ")));
}

#[test]
fn test_invalid_config_rejected_before_loading() {
    let mut loader = FakeLoader::new();
    let mut rng = MapRng::from_seed_u64(1);
    let config = MapConfig::new(0, 10, 32.0, 1);
    let err = TileMap::new(&config, &mut rng.0, &mut loader)
        .err()
        .expect("zero width rejected");
    assert!(matches!(
        err,
        MapError::InvalidConfig(MapGenError::ZeroDimension { width: 0, height: 10 })
    ));
    assert!(loader.loaded.is_empty());
}

#[test]
fn test_oversized_config_rejected_before_generation() {
    let mut loader = FakeLoader::new();
    let mut rng = MapRng::from_seed_u64(1);
    let config = MapConfig::new(1 << 33, 1 << 33, 32.0, 1);
    let err = TileMap::new(&config, &mut rng.0, &mut loader)
        .err()
        .expect("oversized map rejected");
    assert!(matches!(err, MapError::InvalidConfig(MapGenError::TooLarge { .. })));
    assert!(loader.loaded.is_empty());
}

#[test]
fn test_invalid_tile_size_rejected() {
    let mut loader = FakeLoader::new();
    for bad in [0.0, -4.0, f32::NAN, f32::INFINITY] {
        let err = TileMap::from_layers(tiny_layers(), bad, &mut loader)
            .err()
            .expect("bad tile size rejected");
        assert!(matches!(err, MapError::InvalidConfig(MapGenError::InvalidTileSize(_))));
    }
    assert!(loader.loaded.is_empty());
}

#[test]
fn test_same_seed_same_map() {
    let config = MapConfig::new(30, 20, 16.0, 99);
    let build = || {
        let mut rng = MapRng::from_seed_u64(config.seed);
        TileMap::new(&config, &mut rng.0, &mut FakeLoader::new()).expect("builds")
    };
    let a = build();
    let b = build();
    assert_eq!(a.layers(), b.layers());
    assert_eq!(a.world_size(), bevy::math::Vec2::new(480.0, 320.0));
}
