//! Bevy implementations of the map's loader and draw seams.
//!
//! `BevyAssetLoader` loads images through the asset server, validates the
//! grass shader stages with naga and builds the grass material.
//! `FrameDrawList` collects each frame's draw calls, and `sync_draw_pool`
//! mirrors them onto a pool of sprite and mesh entities.

mod draw_list;
mod draw_pool;
mod grass_material;
mod loader;
mod shader_check;

pub use draw_list::{DrawCommand, FrameDrawList};
pub use draw_pool::{
    draw_depth, screen_rect_to_world, setup_tile_quad, sync_draw_pool, DrawPool, PooledShadedTile,
    PooledSprite, TileQuad,
};
pub use grass_material::{GrassMaterial, GRASS_FRAGMENT_SHADER_HANDLE, GRASS_VERTEX_SHADER_HANDLE};
pub use loader::BevyAssetLoader;
pub use shader_check::{compile_stage, link_program, FRAGMENT_ENTRY, VERTEX_ENTRY};
