//! Viewport culling for the tile map.
//!
//! Tiles live in world pixels: tile `(x, y)` covers
//! `[x * tile_size, (x + 1) * tile_size] x [y * tile_size, (y + 1) * tile_size]`.
//! The camera offset is the world position of the viewport's top-left corner,
//! and zoom divides the viewport to get the world extent currently on screen.

use std::ops::RangeInclusive;

use bevy::math::Vec2;

/// Screen-space destination rectangle of one tile draw, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Camera state for one frame: offset in world pixels, viewport in screen
/// pixels, zoom factor (1.0 = none).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub camera: Vec2,
    pub viewport: Vec2,
    pub zoom: f32,
}

impl FrameView {
    pub fn new(camera: Vec2, viewport: Vec2, zoom: f32) -> Self {
        Self {
            camera,
            viewport,
            zoom,
        }
    }

    /// World-space size of the visible area. Higher zoom shows less world.
    pub fn visible_extent(&self) -> Vec2 {
        self.viewport / self.zoom
    }
}

/// Inclusive AABB test between the tile's world rectangle and the visible
/// world rectangle. A tile exactly touching the visible edge counts as visible.
pub fn is_tile_visible(tile_x: usize, tile_y: usize, tile_size: f32, view: &FrameView) -> bool {
    let tile_min = Vec2::new(tile_x as f32 * tile_size, tile_y as f32 * tile_size);
    let tile_max = tile_min + Vec2::splat(tile_size);
    let view_min = view.camera;
    let view_max = view.camera + view.visible_extent();

    !(tile_max.x < view_min.x
        || tile_min.x > view_max.x
        || tile_max.y < view_min.y
        || tile_min.y > view_max.y)
}

/// Screen rectangle for a tile. Zoom only narrows the visibility window;
/// it never scales the destination.
pub fn tile_dest_rect(tile_x: usize, tile_y: usize, tile_size: f32, camera: Vec2) -> TileRect {
    TileRect {
        x: tile_x as f32 * tile_size - camera.x,
        y: tile_y as f32 * tile_size - camera.y,
        w: tile_size,
        h: tile_size,
    }
}

/// Column and row ranges that contain every tile `is_tile_visible` can
/// accept, clamped to the grid. Padded by a tile on each side so rounding
/// never drops a visible tile; callers still run the exact test per tile.
///
/// Returns `None` when no tile can be visible.
pub fn visible_tile_range(
    width: usize,
    height: usize,
    tile_size: f32,
    view: &FrameView,
) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    let extent = view.visible_extent();
    let xs = axis_range(view.camera.x, extent.x, tile_size, width)?;
    let ys = axis_range(view.camera.y, extent.y, tile_size, height)?;
    Some((xs, ys))
}

fn axis_range(start: f32, extent: f32, tile_size: f32, count: usize) -> Option<RangeInclusive<usize>> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let lo = (start / tile_size).floor() - 2.0;
    let hi = ((start + extent) / tile_size).ceil() + 1.0;

    // Degenerate views (non-positive or non-finite extent) fall back to the
    // whole axis and let the exact test decide.
    if !(extent > 0.0) || !lo.is_finite() || !hi.is_finite() {
        return Some(0..=last);
    }
    if hi < 0.0 || lo > last as f32 {
        return None;
    }
    let lo = lo.max(0.0) as usize;
    let hi = (hi as usize).min(last);
    Some(lo..=hi)
}
