use bevy::prelude::*;

pub mod config;
pub mod error;
pub mod grid;
pub mod map_config;
pub mod map_layers;
pub mod map_rng;
pub mod prop_generation;
pub mod smoothing;
pub mod terrain_generation;
pub mod tiles;


pub use error::MapGenError;
pub use grid::Grid;
pub use map_config::{random_seed, MapConfig};
pub use map_layers::{generate_map_layers, MapLayers};
pub use map_rng::MapRng;
pub use tiles::{PropType, TerrainType};

/// Request a brand new map built from `seed`.
#[derive(Event, Debug, Clone, Copy)]
pub struct RegenerateMap {
    pub seed: u64,
}

/// Registers the map parameters, the seeded RNG and the regenerate event.
///
/// Insert a `MapConfig` before adding this plugin to override the defaults;
/// the RNG is seeded from whichever config is present at build time.
pub struct MapGenPlugin;

impl Plugin for MapGenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapConfig>();
        let seed = app.world().resource::<MapConfig>().seed;
        app.insert_resource(MapRng::from_seed_u64(seed))
            .add_event::<RegenerateMap>();
    }
}
