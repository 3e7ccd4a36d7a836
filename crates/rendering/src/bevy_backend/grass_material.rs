use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};
use bevy::sprite::Material2d;

/// Vertex stage of the grass program, filled in by `BevyAssetLoader::compile_program`.
pub const GRASS_VERTEX_SHADER_HANDLE: Handle<Shader> =
    Handle::weak_from_u128(0x6a3e_91c2_54b7_4f08_9d1a_2c7e_b5f3_0e41);
/// Fragment stage of the grass program.
pub const GRASS_FRAGMENT_SHADER_HANDLE: Handle<Shader> =
    Handle::weak_from_u128(0x1f8d_07a6_c3e9_4b52_8e60_d4a1_7b29_c6f3);

/// Material for shaded grass tiles. `resolution` carries the viewport size
/// in screen pixels; `texture` is the grass image.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GrassMaterial {
    #[uniform(0)]
    pub resolution: Vec2,
    #[texture(1)]
    #[sampler(2)]
    pub texture: Option<Handle<Image>>,
}

impl Material2d for GrassMaterial {
    fn vertex_shader() -> ShaderRef {
        GRASS_VERTEX_SHADER_HANDLE.into()
    }

    fn fragment_shader() -> ShaderRef {
        GRASS_FRAGMENT_SHADER_HANDLE.into()
    }
}
