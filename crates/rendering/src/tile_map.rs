//! The tile map: generated layers plus the graphics handles used to draw them.
//!
//! Layers are generated once in `TileMap::new` and never edited afterwards.
//! Each frame the caller runs `draw_terrain` then `draw_props` (or `draw`,
//! which does both in that order) against a `DrawTarget`. Only tiles whose
//! world rectangle overlaps the visible window are issued.

use std::ops::AddAssign;

use bevy::prelude::*;
use rand::Rng;

use mapgen::{generate_map_layers, Grid, MapConfig, MapGenError, MapLayers, PropType, TerrainType};

use crate::assets::{
    load_grass_program, GrassProgram, TextureSet, TextureSlot, ASSET_MANIFEST, RESOLUTION_UNIFORM,
};
use crate::backend::{AssetLoader, DrawTarget};
use crate::dispatch::{prop_texture, terrain_draw};
use crate::error::MapError;
use crate::viewport::{is_tile_visible, tile_dest_rect, visible_tile_range, FrameView, TileRect};

/// Draw counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub terrain_tiles: usize,
    pub prop_tiles: usize,
    /// Terrain tiles drawn with the grass program bound.
    pub shaded_tiles: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.terrain_tiles += rhs.terrain_tiles;
        self.prop_tiles += rhs.prop_tiles;
        self.shaded_tiles += rhs.shaded_tiles;
    }
}

/// Generated map plus its textures and grass program.
///
/// `T` and `P` are the backend's texture and program handle types. The map
/// owns them exclusively; they are released when the map is dropped.
pub struct TileMap<T, P> {
    layers: MapLayers,
    tile_size: f32,
    textures: TextureSet<T>,
    grass_program: Option<P>,
    /// Why `grass_program` is `None`.
    shader_error: Option<MapError>,
}

impl<T, P> TileMap<T, P> {
    /// Generate layers from `config` with `rng`, then load every asset.
    pub fn new<L, R>(config: &MapConfig, rng: &mut R, loader: &mut L) -> Result<Self, MapError>
    where
        L: AssetLoader<Texture = T, Program = P> + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let layers = generate_map_layers(config.width, config.height, rng);
        Self::from_layers(layers, config.tile_size, loader)
    }

    /// Build a map around layers produced elsewhere.
    pub fn from_layers<L>(layers: MapLayers, tile_size: f32, loader: &mut L) -> Result<Self, MapError>
    where
        L: AssetLoader<Texture = T, Program = P> + ?Sized,
    {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(MapGenError::InvalidTileSize(tile_size).into());
        }
        let textures = TextureSet::load(loader, &ASSET_MANIFEST)?;
        let (grass_program, shader_error) = match load_grass_program(loader, &ASSET_MANIFEST)? {
            GrassProgram::Compiled(program) => (Some(program), None),
            GrassProgram::Disabled(e) => (None, Some(e)),
        };

        info!(
            "Tile map ready: {}x{} tiles of {}px, {} textures, grass shader {}",
            layers.width(),
            layers.height(),
            tile_size,
            textures.len(),
            if grass_program.is_some() { "on" } else { "off" },
        );

        Ok(Self {
            layers,
            tile_size,
            textures,
            grass_program,
            shader_error,
        })
    }

    pub fn width(&self) -> usize {
        self.layers.width()
    }

    pub fn height(&self) -> usize {
        self.layers.height()
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn terrain(&self) -> &Grid<TerrainType> {
        self.layers.terrain()
    }

    pub fn props(&self) -> &Grid<PropType> {
        self.layers.props()
    }

    pub fn layers(&self) -> &MapLayers {
        &self.layers
    }

    pub fn texture(&self, slot: TextureSlot) -> &T {
        self.textures.get(slot)
    }

    pub fn has_grass_shader(&self) -> bool {
        self.grass_program.is_some()
    }

    /// The compile or link failure that disabled the grass shader, if any.
    pub fn shader_error(&self) -> Option<&MapError> {
        self.shader_error.as_ref()
    }

    /// World-space size of the map in pixels.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width() as f32 * self.tile_size,
            self.height() as f32 * self.tile_size,
        )
    }

    /// Draw the ground layer. Grass is wrapped in the grass program when one
    /// was built; every other tile draws with no program bound.
    pub fn draw_terrain<D>(&self, target: &mut D, view: &FrameView) -> FrameStats
    where
        D: DrawTarget<T, P> + ?Sized,
    {
        let mut stats = FrameStats::default();
        self.for_each_visible(view, |x, y, dest| {
            let draw = terrain_draw(self.terrain().get(x, y));
            let texture = self.textures.get(draw.texture);
            match (draw.shaded, self.grass_program.as_ref()) {
                (true, Some(program)) => {
                    target.bind_program(program);
                    target.set_uniform_vec2(program, RESOLUTION_UNIFORM, view.viewport);
                    target.draw_texture(texture, dest);
                    target.unbind_program();
                    stats.shaded_tiles += 1;
                }
                _ => target.draw_texture(texture, dest),
            }
            stats.terrain_tiles += 1;
        });
        stats
    }

    /// Draw the prop layer. Call after `draw_terrain` so props land on top.
    pub fn draw_props<D>(&self, target: &mut D, view: &FrameView) -> FrameStats
    where
        D: DrawTarget<T, P> + ?Sized,
    {
        let mut stats = FrameStats::default();
        self.for_each_visible(view, |x, y, dest| {
            if let Some(slot) = prop_texture(self.props().get(x, y)) {
                target.draw_texture(self.textures.get(slot), dest);
                stats.prop_tiles += 1;
            }
        });
        stats
    }

    /// Terrain then props, in that order.
    pub fn draw<D>(&self, target: &mut D, view: &FrameView) -> FrameStats
    where
        D: DrawTarget<T, P> + ?Sized,
    {
        let mut stats = self.draw_terrain(target, view);
        stats += self.draw_props(target, view);
        stats
    }

    /// Row-major walk over the visible tiles with their screen rectangles.
    fn for_each_visible(&self, view: &FrameView, mut visit: impl FnMut(usize, usize, TileRect)) {
        let Some((xs, ys)) = visible_tile_range(self.width(), self.height(), self.tile_size, view)
        else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                if is_tile_visible(x, y, self.tile_size, view) {
                    visit(x, y, tile_dest_rect(x, y, self.tile_size, view.camera));
                }
            }
        }
    }
}
