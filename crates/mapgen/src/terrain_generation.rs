//! Terrain layer generation.
//!
//! Every interior cell takes one uniform draw in `[0, TERRAIN_ROLL_RANGE)`
//! mapped through `TerrainType::from_roll`. The border is always water, so
//! every generated map is an island surrounded by sea.

use bevy::prelude::*;
use rand::Rng;

use crate::config::TERRAIN_ROLL_RANGE;
use crate::grid::Grid;
use crate::tiles::TerrainType;

/// Generate the raw terrain layer (before smoothing).
///
/// Grids narrower or shorter than 3 cells have no interior; they come back
/// as all water and consume no draws.
pub fn generate_terrain<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    rng: &mut R,
) -> Grid<TerrainType> {
    let mut grid = Grid::new(width, height, TerrainType::Water);

    // Border pass. Later steps only touch the interior, so the border stays water.
    let border: Vec<(usize, usize)> = grid.border_cells().collect();
    for (x, y) in border {
        grid.set(x, y, TerrainType::Water);
    }

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let roll: u32 = rng.gen_range(0..TERRAIN_ROLL_RANGE);
            grid.set(x, y, TerrainType::from_roll(roll));
        }
    }

    info!(
        "Terrain generated: {}x{} ({} water, {} sand, {} grass)",
        width,
        height,
        grid.count(|t| t == TerrainType::Water),
        grid.count(|t| t == TerrainType::Sand),
        grid.count(|t| t == TerrainType::Grass),
    );

    grid
}
