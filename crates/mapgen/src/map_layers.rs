use rand::Rng;

use crate::error::MapGenError;
use crate::grid::Grid;
use crate::prop_generation::generate_props;
use crate::smoothing::smooth_isolated_water;
use crate::terrain_generation::generate_terrain;
use crate::tiles::{PropType, TerrainType};

/// The two aligned layers of a finished map. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayers {
    terrain: Grid<TerrainType>,
    props: Grid<PropType>,
}

impl MapLayers {
    /// Pair pre-built layers. Both must have the same dimensions.
    pub fn new(terrain: Grid<TerrainType>, props: Grid<PropType>) -> Result<Self, MapGenError> {
        if terrain.width() != props.width() || terrain.height() != props.height() {
            return Err(MapGenError::LayerSizeMismatch {
                terrain: (terrain.width(), terrain.height()),
                props: (props.width(), props.height()),
            });
        }
        Ok(Self { terrain, props })
    }

    pub fn terrain(&self) -> &Grid<TerrainType> {
        &self.terrain
    }

    pub fn props(&self) -> &Grid<PropType> {
        &self.props
    }

    pub fn width(&self) -> usize {
        self.terrain.width()
    }

    pub fn height(&self) -> usize {
        self.terrain.height()
    }
}

/// Run the full generation pipeline:
/// 1. Raw terrain (water border, rolled interior)
/// 2. Isolated-water smoothing
/// 3. Props on the smoothed grass
pub fn generate_map_layers<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> MapLayers {
    let mut terrain = generate_terrain(width, height, rng);
    let converted = smooth_isolated_water(&mut terrain);
    bevy::log::debug!("Smoothing converted {} isolated water tiles", converted);
    let props = generate_props(&terrain, rng);
    MapLayers { terrain, props }
}
