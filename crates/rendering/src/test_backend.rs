//! In-memory backend for tests and benches.
//!
//! `FakeLoader` hands out texture and program handles that record their own
//! release, and `RecordingTarget` keeps every draw call it receives.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use bevy::math::Vec2;

use crate::backend::{AssetLoader, DrawTarget};
use crate::error::MapError;
use crate::viewport::TileRect;

/// Shared record of released handles, in release order.
pub type ReleaseLog = Rc<RefCell<Vec<String>>>;

#[derive(Debug)]
pub struct FakeTexture {
    pub path: String,
    released: ReleaseLog,
}

impl Drop for FakeTexture {
    fn drop(&mut self) {
        self.released.borrow_mut().push(format!("texture {}", self.path));
    }
}

#[derive(Debug)]
pub struct FakeProgram {
    pub id: u32,
    released: ReleaseLog,
}

impl Drop for FakeProgram {
    fn drop(&mut self) {
        self.released.borrow_mut().push(format!("program {}", self.id));
    }
}

/// Loader with configurable failures.
#[derive(Default)]
pub struct FakeLoader {
    /// Paths that fail to load as missing files.
    pub missing: HashSet<String>,
    /// Make `compile_program` fail.
    pub fail_compile: bool,
    /// Every path successfully loaded or read, in order.
    pub loaded: Vec<String>,
    pub released: ReleaseLog,
    next_program_id: u32,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    pub fn with_failing_compile(mut self) -> Self {
        self.fail_compile = true;
        self
    }

    fn check(&mut self, path: &str) -> Result<(), MapError> {
        if self.missing.contains(path) {
            return Err(MapError::asset_unavailable(path, "file not found"));
        }
        self.loaded.push(path.to_string());
        Ok(())
    }
}

impl AssetLoader for FakeLoader {
    type Texture = FakeTexture;
    type Program = FakeProgram;

    fn load_texture(&mut self, path: &str) -> Result<FakeTexture, MapError> {
        self.check(path)?;
        Ok(FakeTexture {
            path: path.to_string(),
            released: self.released.clone(),
        })
    }

    fn read_shader_source(&mut self, path: &str) -> Result<String, MapError> {
        self.check(path)?;
        Ok(format!("// {path}"))
    }

    fn compile_program(
        &mut self,
        _vertex_source: &str,
        _fragment_source: &str,
    ) -> Result<FakeProgram, MapError> {
        if self.fail_compile {
            return Err(MapError::ShaderCompile("link failed".to_string()));
        }
        self.next_program_id += 1;
        Ok(FakeProgram {
            id: self.next_program_id,
            released: self.released.clone(),
        })
    }
}

/// One call received by `RecordingTarget`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BindProgram(u32),
    SetUniform { program: u32, name: String, value: Vec2 },
    UnbindProgram,
    Draw {
        texture: String,
        dest: TileRect,
        /// Program bound at the time of the draw.
        program: Option<u32>,
    },
}

#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<DrawCall>,
    bound: Option<u32>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the `Draw` calls, in order.
    pub fn draws(&self) -> impl Iterator<Item = (&str, TileRect, Option<u32>)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Draw {
                texture,
                dest,
                program,
            } => Some((texture.as_str(), *dest, *program)),
            _ => None,
        })
    }
}

impl DrawTarget<FakeTexture, FakeProgram> for RecordingTarget {
    fn bind_program(&mut self, program: &FakeProgram) {
        self.bound = Some(program.id);
        self.calls.push(DrawCall::BindProgram(program.id));
    }

    fn set_uniform_vec2(&mut self, program: &FakeProgram, name: &str, value: Vec2) {
        self.calls.push(DrawCall::SetUniform {
            program: program.id,
            name: name.to_string(),
            value,
        });
    }

    fn unbind_program(&mut self) {
        self.bound = None;
        self.calls.push(DrawCall::UnbindProgram);
    }

    fn draw_texture(&mut self, texture: &FakeTexture, dest: TileRect) {
        self.calls.push(DrawCall::Draw {
            texture: texture.path.clone(),
            dest,
            program: self.bound,
        });
    }
}
