//! Tile code → draw mapping. Adding a tile type means adding one arm here.

use mapgen::{PropType, TerrainType};

use crate::assets::TextureSlot;

/// How one terrain tile is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainDraw {
    pub texture: TextureSlot,
    /// Bind the grass program around the draw.
    pub shaded: bool,
}

pub fn terrain_draw(terrain: TerrainType) -> TerrainDraw {
    match terrain {
        TerrainType::Water => TerrainDraw {
            texture: TextureSlot::Water,
            shaded: false,
        },
        // No sand asset: sand reuses the grass texture, without the shader.
        TerrainType::Sand => TerrainDraw {
            texture: TextureSlot::Grass,
            shaded: false,
        },
        TerrainType::Grass => TerrainDraw {
            texture: TextureSlot::Grass,
            shaded: true,
        },
    }
}

/// Texture for a prop, `None` for bare cells.
pub fn prop_texture(prop: PropType) -> Option<TextureSlot> {
    match prop {
        PropType::None => None,
        PropType::Forest => Some(TextureSlot::Forest),
        PropType::RockBig => Some(TextureSlot::RockBig),
        PropType::RockMedium => Some(TextureSlot::RockMedium),
        PropType::Flower1 => Some(TextureSlot::Flower1),
        PropType::Flower2 => Some(TextureSlot::Flower2),
        PropType::Bush1 => Some(TextureSlot::Bush1),
    }
}
