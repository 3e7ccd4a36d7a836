use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;

use super::grass_material::{GrassMaterial, GRASS_FRAGMENT_SHADER_HANDLE, GRASS_VERTEX_SHADER_HANDLE};
use super::shader_check::link_program;
use crate::assets::ASSET_MANIFEST;
use crate::backend::AssetLoader;
use crate::error::MapError;

/// `AssetLoader` over Bevy's asset server.
///
/// Textures are checked on disk first so a missing file fails construction
/// instead of surfacing later as an asset-server load error. The program is
/// the pair of stage shaders registered under fixed handles plus one
/// `GrassMaterial` instance, created only once both stages validate.
pub struct BevyAssetLoader<'a> {
    pub asset_server: &'a AssetServer,
    pub shaders: &'a mut Assets<Shader>,
    pub materials: &'a mut Assets<GrassMaterial>,
    /// Directory the asset server reads from.
    pub asset_root: PathBuf,
}

impl AssetLoader for BevyAssetLoader<'_> {
    type Texture = Handle<Image>;
    type Program = Handle<GrassMaterial>;

    fn load_texture(&mut self, path: &str) -> Result<Handle<Image>, MapError> {
        let full_path = self.asset_root.join(path);
        if !full_path.is_file() {
            return Err(MapError::asset_unavailable(path, "file not found"));
        }
        Ok(self.asset_server.load(path.to_string()))
    }

    fn read_shader_source(&mut self, path: &str) -> Result<String, MapError> {
        fs::read_to_string(self.asset_root.join(path))
            .map_err(|e| MapError::asset_unavailable(path, e))
    }

    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Handle<GrassMaterial>, MapError> {
        link_program(vertex_source, fragment_source)?;

        self.shaders.insert(
            &GRASS_VERTEX_SHADER_HANDLE,
            Shader::from_wgsl(vertex_source.to_string(), ASSET_MANIFEST.vertex_shader),
        );
        self.shaders.insert(
            &GRASS_FRAGMENT_SHADER_HANDLE,
            Shader::from_wgsl(fragment_source.to_string(), ASSET_MANIFEST.fragment_shader),
        );

        Ok(self.materials.add(GrassMaterial {
            resolution: Vec2::ZERO,
            texture: None,
        }))
    }
}
