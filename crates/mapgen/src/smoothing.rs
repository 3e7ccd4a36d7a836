//! Isolated-water cleanup.
//!
//! One in-place sweep over the interior turns every water cell with no
//! orthogonal water neighbour into grass. A converted cell had no water
//! neighbours, so no remaining water cell can lose its neighbour during the
//! sweep; a second sweep therefore converts nothing.

use crate::grid::Grid;
use crate::tiles::TerrainType;

/// True when `(x, y)` is water and none of its in-bounds orthogonal
/// neighbours are water.
pub fn is_isolated_water(grid: &Grid<TerrainType>, x: usize, y: usize) -> bool {
    if !grid.get(x, y).is_water() {
        return false;
    }
    let (neighbors, count) = grid.neighbors4(x, y);
    !neighbors[..count]
        .iter()
        .any(|&(nx, ny)| grid.get(nx, ny).is_water())
}

/// Convert isolated interior water cells to grass. Border cells are never
/// touched. Returns the number of converted cells.
pub fn smooth_isolated_water(grid: &mut Grid<TerrainType>) -> usize {
    let mut converted = 0;
    for y in 1..grid.height().saturating_sub(1) {
        for x in 1..grid.width().saturating_sub(1) {
            if is_isolated_water(grid, x, y) {
                grid.set(x, y, TerrainType::Grass);
                converted += 1;
            }
        }
    }
    converted
}
