//! Systems that own the live `TileMap` and feed it to the draw list.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use mapgen::{MapConfig, MapRng, RegenerateMap};

use crate::bevy_backend::{BevyAssetLoader, FrameDrawList, GrassMaterial};
use crate::camera::MapCamera;
use crate::error::MapError;
use crate::tile_map::{FrameStats, TileMap};

pub type BevyTileMap = TileMap<Handle<Image>, Handle<GrassMaterial>>;

/// The map currently on screen. Replacing it drops the old map's handles.
#[derive(Resource)]
pub struct ActiveMap(pub BevyTileMap);

/// Filesystem directory the asset server reads from. Used to check for
/// missing files and to read shader sources.
#[derive(Resource, Debug, Clone)]
pub struct AssetRoot(pub PathBuf);

impl Default for AssetRoot {
    fn default() -> Self {
        Self(PathBuf::from("assets"))
    }
}

/// Last grass shader failure reported to the log. A rebuild hitting the same
/// failure logs at debug level only.
#[derive(Resource, Default, Debug)]
pub struct ShaderFailureReport {
    last: Option<String>,
}

impl ShaderFailureReport {
    /// Record the shader state of a freshly built map. Returns true when the
    /// failure is new and should be logged as a warning.
    pub fn note(&mut self, error: Option<&MapError>) -> bool {
        let message = error.map(ToString::to_string);
        let fresh = message.is_some() && message != self.last;
        self.last = message;
        fresh
    }
}

fn report_shader_state(report: &mut ShaderFailureReport, map: &BevyTileMap) {
    let error = map.shader_error();
    let fresh = report.note(error);
    if let Some(e) = error {
        if fresh {
            warn!("Grass shader disabled, drawing grass unshaded: {}", e);
        } else {
            debug!("Grass shader still disabled: {}", e);
        }
    }
}

/// Counts from the last `draw_map` run.
#[derive(Resource, Default, Debug)]
pub struct MapFrameStats(pub FrameStats);

pub fn build_map(
    config: &MapConfig,
    rng: &mut MapRng,
    asset_server: &AssetServer,
    shaders: &mut Assets<Shader>,
    materials: &mut Assets<GrassMaterial>,
    asset_root: &AssetRoot,
) -> Result<BevyTileMap, MapError> {
    let mut loader = BevyAssetLoader {
        asset_server,
        shaders,
        materials,
        asset_root: asset_root.0.clone(),
    };
    TileMap::new(config, &mut rng.0, &mut loader)
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_map(
    mut commands: Commands,
    config: Res<MapConfig>,
    mut rng: ResMut<MapRng>,
    asset_server: Res<AssetServer>,
    mut shaders: ResMut<Assets<Shader>>,
    mut materials: ResMut<Assets<GrassMaterial>>,
    asset_root: Res<AssetRoot>,
    mut shader_report: ResMut<ShaderFailureReport>,
) {
    match build_map(
        &config,
        &mut rng,
        &asset_server,
        &mut shaders,
        &mut materials,
        &asset_root,
    ) {
        Ok(map) => {
            info!("Map generated with seed {}", config.seed);
            report_shader_state(&mut shader_report, &map);
            commands.insert_resource(ActiveMap(map));
        }
        Err(e) => error!("Failed to build tile map: {}", e),
    }
}

/// Rebuild the map for the last `RegenerateMap` of the frame. A failed
/// rebuild keeps the current map.
#[allow(clippy::too_many_arguments)]
pub fn regenerate_map(
    mut commands: Commands,
    mut events: EventReader<RegenerateMap>,
    mut config: ResMut<MapConfig>,
    mut rng: ResMut<MapRng>,
    asset_server: Res<AssetServer>,
    mut shaders: ResMut<Assets<Shader>>,
    mut materials: ResMut<Assets<GrassMaterial>>,
    asset_root: Res<AssetRoot>,
    mut shader_report: ResMut<ShaderFailureReport>,
) {
    let Some(request) = events.read().last().copied() else {
        return;
    };

    config.seed = request.seed;
    rng.reseed(request.seed);
    match build_map(
        &config,
        &mut rng,
        &asset_server,
        &mut shaders,
        &mut materials,
        &asset_root,
    ) {
        Ok(map) => {
            info!("Map regenerated with seed {}", request.seed);
            report_shader_state(&mut shader_report, &map);
            commands.insert_resource(ActiveMap(map));
        }
        Err(e) => warn!("Regenerating map failed, keeping current map: {}", e),
    }
}

/// Issue this frame's draw calls: terrain, then props.
pub fn draw_map(
    map: Option<Res<ActiveMap>>,
    camera: Res<MapCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut draw_list: ResMut<FrameDrawList>,
    mut stats: ResMut<MapFrameStats>,
) {
    draw_list.clear();
    let Some(map) = map else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let viewport = Vec2::new(window.width(), window.height());
    let view = camera.frame_view(viewport);
    let frame = map.0.draw(draw_list.as_mut(), &view);
    if frame != stats.0 {
        debug!(
            "Map frame: {} terrain, {} props, {} shaded",
            frame.terrain_tiles, frame.prop_tiles, frame.shaded_tiles
        );
        stats.0 = frame;
    }
}
