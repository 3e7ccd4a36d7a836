//! Map parameters chosen at startup.
//!
//! `MapConfig` is a Bevy resource with defaults from `config.rs`. The app may
//! replace it from a JSON file before `MapGenPlugin` is added; missing fields
//! fall back to their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TILE_SIZE, MAX_GRID_CELLS};
use crate::error::MapGenError;

/// Dimensions, tile size and seed for one generated map.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in tiles.
    pub width: usize,
    /// Map height in tiles.
    pub height: usize,
    /// Edge length of one tile in world pixels.
    pub tile_size: f32,
    /// Seed for terrain and prop generation.
    pub seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            seed: random_seed(),
        }
    }
}

impl MapConfig {
    pub fn new(width: usize, height: usize, tile_size: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            tile_size,
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a config from JSON text. Absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, MapGenError> {
        let config: MapConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject dimensions and tile sizes that cannot describe a map.
    ///
    /// Grids smaller than 3x3 are accepted: they are all border. Grids with
    /// more than `MAX_GRID_CELLS` cells are not.
    pub fn validate(&self) -> Result<(), MapGenError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapGenError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let fits = self
            .width
            .checked_mul(self.height)
            .is_some_and(|cells| cells <= MAX_GRID_CELLS);
        if !fits {
            return Err(MapGenError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(MapGenError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    /// World-space size of the whole map in pixels.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }
}

/// Generate a random seed from the current system time.
pub fn random_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
