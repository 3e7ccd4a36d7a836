//! Seams to the graphics backend.
//!
//! `TileMap` never talks to a renderer directly. Construction goes through an
//! `AssetLoader` (images, shader sources, program compilation) and each frame
//! goes through a `DrawTarget` (program binding and textured rectangles).
//! Handles returned by a loader are owned by the map and released on drop.

use bevy::math::Vec2;

use crate::error::MapError;
use crate::viewport::TileRect;

/// Construction-time services: load images and build shader programs.
pub trait AssetLoader {
    type Texture;
    type Program;

    /// Load the image at `path` (relative to the asset root).
    fn load_texture(&mut self, path: &str) -> Result<Self::Texture, MapError>;

    /// Read shader source text at `path` (relative to the asset root).
    fn read_shader_source(&mut self, path: &str) -> Result<String, MapError>;

    /// Compile both stages, link them into a program and validate it.
    /// Intermediate per-stage objects are the loader's to clean up.
    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self::Program, MapError>;
}

/// Per-frame services: bind programs and draw textured rectangles.
pub trait DrawTarget<T, P> {
    fn bind_program(&mut self, program: &P);

    fn set_uniform_vec2(&mut self, program: &P, name: &str, value: Vec2);

    fn unbind_program(&mut self);

    /// Draw `texture` stretched over `dest` (screen pixels, origin top-left).
    fn draw_texture(&mut self, texture: &T, dest: TileRect);
}
