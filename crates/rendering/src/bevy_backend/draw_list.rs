use bevy::prelude::*;
use bevy::utils::HashMap;

use super::grass_material::GrassMaterial;
use crate::assets::RESOLUTION_UNIFORM;
use crate::backend::DrawTarget;
use crate::viewport::TileRect;

/// One textured rectangle queued for this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub texture: Handle<Image>,
    pub dest: TileRect,
    /// Grass material bound when the draw was issued.
    pub material: Option<Handle<GrassMaterial>>,
}

/// Immediate-mode draw calls collected during `Update`, turned into pooled
/// entities by `sync_draw_pool`. Commands keep issue order, which is also
/// their stacking order.
#[derive(Resource, Default, Debug)]
pub struct FrameDrawList {
    pub commands: Vec<DrawCommand>,
    /// Latest `resolution` value per material.
    pub resolutions: HashMap<AssetId<GrassMaterial>, Vec2>,
    bound: Option<Handle<GrassMaterial>>,
}

impl FrameDrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
        self.resolutions.clear();
        self.bound = None;
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawTarget<Handle<Image>, Handle<GrassMaterial>> for FrameDrawList {
    fn bind_program(&mut self, program: &Handle<GrassMaterial>) {
        self.bound = Some(program.clone());
    }

    fn set_uniform_vec2(&mut self, program: &Handle<GrassMaterial>, name: &str, value: Vec2) {
        if name == RESOLUTION_UNIFORM {
            self.resolutions.insert(program.id(), value);
        } else {
            debug!("Ignoring unknown grass uniform '{}'", name);
        }
    }

    fn unbind_program(&mut self) {
        self.bound = None;
    }

    fn draw_texture(&mut self, texture: &Handle<Image>, dest: TileRect) {
        self.commands.push(DrawCommand {
            texture: texture.clone(),
            dest,
            material: self.bound.clone(),
        });
    }
}
