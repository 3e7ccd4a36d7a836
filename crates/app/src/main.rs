use std::path::PathBuf;

use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use mapgen::{MapConfig, MapGenError};
use rendering::map_systems::AssetRoot;

/// Path to a JSON `MapConfig`.
const CONFIG_ENV: &str = "TILEMAP_CONFIG";
/// Overrides the seed from the config file.
const SEED_ENV: &str = "TILEMAP_SEED";
/// Save one screenshot of the first view to this path, then exit.
const SCREENSHOT_ENV: &str = "TILEMAP_SCREENSHOT";

/// Frames to wait for textures to finish loading before the screenshot.
const SCREENSHOT_FRAME: u32 = 60;
const SCREENSHOT_EXIT_FRAME: u32 = SCREENSHOT_FRAME + 30;

fn main() {
    let asset_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets");

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Tile Map".to_string(),
                    resolution: (1280.0, 720.0).into(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_root.to_string_lossy().into_owned(),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(AssetRoot(asset_root));

    // After DefaultPlugins so config problems reach the log.
    let config = startup_config(
        std::env::var(CONFIG_ENV).ok().as_deref(),
        std::env::var(SEED_ENV).ok().as_deref(),
    );
    info!(
        "Map config: {}x{} tiles of {}px, seed {}",
        config.width, config.height, config.tile_size, config.seed
    );
    app.insert_resource(config)
        .add_plugins((mapgen::MapGenPlugin, rendering::RenderingPlugin));

    if let Ok(path) = std::env::var(SCREENSHOT_ENV) {
        app.insert_resource(ScreenshotRequest { frame: 0, path })
            .add_systems(Update, drive_screenshot);
    }

    app.run();
}

/// Config from the optional JSON file and seed override. Anything unusable
/// is logged and replaced by defaults.
fn startup_config(config_path: Option<&str>, seed: Option<&str>) -> MapConfig {
    let mut config = match config_path {
        Some(path) => match read_config(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring map config {}: {}", path, e);
                MapConfig::default()
            }
        },
        None => MapConfig::default(),
    };

    if let Some(raw) = seed {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed = seed,
            Err(e) => warn!("Ignoring {}={:?}: {}", SEED_ENV, raw, e),
        }
    }
    config
}

fn read_config(path: &str) -> Result<MapConfig, MapGenError> {
    let text = std::fs::read_to_string(path).map_err(|e| MapGenError::Parse(e.to_string()))?;
    MapConfig::from_json(&text)
}

#[derive(Resource)]
struct ScreenshotRequest {
    frame: u32,
    path: String,
}

fn drive_screenshot(
    mut commands: Commands,
    mut request: ResMut<ScreenshotRequest>,
    mut exit: EventWriter<AppExit>,
) {
    request.frame += 1;
    if request.frame == SCREENSHOT_FRAME {
        info!("Saving screenshot to {}", request.path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(request.path.clone()));
    } else if request.frame >= SCREENSHOT_EXIT_FRAME {
        exit.send(AppExit::Success);
    }
}
