use serde::{Deserialize, Serialize};

use crate::config::{PROP_ROLL_BAND, SAND_ROLL_END, WATER_ROLL_END};

/// Ground layer code. Every map border cell is `Water`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TerrainType {
    #[default]
    Water,
    Sand,
    Grass,
}

impl TerrainType {
    pub const ALL: [TerrainType; 3] = [TerrainType::Water, TerrainType::Sand, TerrainType::Grass];

    /// Map a uniform draw in `[0, TERRAIN_ROLL_RANGE)` to a terrain type.
    pub fn from_roll(roll: u32) -> Self {
        if roll < WATER_ROLL_END {
            TerrainType::Water
        } else if roll < SAND_ROLL_END {
            TerrainType::Sand
        } else {
            TerrainType::Grass
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, TerrainType::Water)
    }
}

/// Decoration layer code, only ever placed on grass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PropType {
    #[default]
    None,
    Forest,
    RockBig,
    RockMedium,
    Flower1,
    Flower2,
    Bush1,
}

impl PropType {
    /// Placeable props in roll-band order. Band `i` covers
    /// `[i * PROP_ROLL_BAND, (i + 1) * PROP_ROLL_BAND)`.
    pub const PLACEABLE: [PropType; 6] = [
        PropType::Forest,
        PropType::RockBig,
        PropType::RockMedium,
        PropType::Flower1,
        PropType::Flower2,
        PropType::Bush1,
    ];

    /// Map a uniform draw in `[0, PROP_ROLL_RANGE)` to a prop type.
    pub fn from_roll(roll: u32) -> Self {
        let band = (roll / PROP_ROLL_BAND) as usize;
        Self::PLACEABLE.get(band).copied().unwrap_or(PropType::None)
    }

    pub fn is_some(self) -> bool {
        !matches!(self, PropType::None)
    }
}
