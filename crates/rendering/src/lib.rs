use bevy::prelude::*;
use bevy::sprite::Material2dPlugin;

pub mod assets;
pub mod backend;
pub mod bevy_backend;
pub mod camera;
pub mod dispatch;
pub mod error;
pub mod map_systems;
pub mod tile_map;
pub mod viewport;

#[cfg(any(test, feature = "bench"))]
pub mod test_backend;


pub use error::MapError;
pub use tile_map::{FrameStats, TileMap};
pub use viewport::{is_tile_visible, FrameView, TileRect};

use bevy_backend::{DrawPool, FrameDrawList, GrassMaterial};
use camera::MapCamera;
use map_systems::{AssetRoot, MapFrameStats, ShaderFailureReport};

/// Builds the map at startup and draws it every frame.
///
/// Requires `mapgen::MapGenPlugin` for the config, RNG and regenerate event.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(Material2dPlugin::<GrassMaterial>::default())
            .init_resource::<AssetRoot>()
            .init_resource::<MapCamera>()
            .init_resource::<FrameDrawList>()
            .init_resource::<DrawPool>()
            .init_resource::<MapFrameStats>()
            .init_resource::<ShaderFailureReport>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    bevy_backend::setup_tile_quad,
                    map_systems::spawn_map,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_zoom,
                    camera::camera_zoom_keyboard,
                    camera::request_regenerate,
                    map_systems::regenerate_map,
                    camera::clamp_camera_to_map,
                    map_systems::draw_map,
                    bevy_backend::sync_draw_pool,
                )
                    .chain(),
            );
    }
}
