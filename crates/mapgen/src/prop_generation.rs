//! Prop layer generation.
//!
//! Props only ever sit on interior grass. Each such cell takes one uniform
//! draw in `[0, PROP_ROLL_RANGE)` mapped through `PropType::from_roll`:
//! every placeable prop has a 5% chance and 70% of grass stays bare.

use bevy::prelude::*;
use rand::Rng;

use crate::config::PROP_ROLL_RANGE;
use crate::grid::Grid;
use crate::tiles::{PropType, TerrainType};

/// Generate a prop layer aligned with `terrain`.
///
/// Border cells and non-grass cells are never visited and stay
/// `PropType::None`.
pub fn generate_props<R: Rng + ?Sized>(
    terrain: &Grid<TerrainType>,
    rng: &mut R,
) -> Grid<PropType> {
    let width = terrain.width();
    let height = terrain.height();
    let mut props = Grid::new(width, height, PropType::None);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if terrain.get(x, y) != TerrainType::Grass {
                continue;
            }
            let roll: u32 = rng.gen_range(0..PROP_ROLL_RANGE);
            props.set(x, y, PropType::from_roll(roll));
        }
    }

    info!(
        "Props generated: {} placed on {} grass tiles",
        props.count(PropType::is_some),
        terrain.count(|t| t == TerrainType::Grass),
    );

    props
}
