pub const DEFAULT_GRID_WIDTH: usize = 64;
pub const DEFAULT_GRID_HEIGHT: usize = 48;
pub const DEFAULT_TILE_SIZE: f32 = 32.0;

/// Upper bound on `width * height` for a config to be accepted (4096x4096).
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Number of outcomes in a terrain draw. Rolls are uniform in `[0, TERRAIN_ROLL_RANGE)`.
pub const TERRAIN_ROLL_RANGE: u32 = 11;
/// Rolls below this value become water (2 of 11 outcomes).
pub const WATER_ROLL_END: u32 = 2;
/// Rolls below this value (and not water) become sand (3 of 11 outcomes).
/// Everything from here up to `TERRAIN_ROLL_RANGE` is grass (6 of 11 outcomes).
pub const SAND_ROLL_END: u32 = 5;

/// Number of outcomes in a prop draw. Rolls are uniform in `[0, PROP_ROLL_RANGE)`.
pub const PROP_ROLL_RANGE: u32 = 100;
/// Width of each prop band. Six bands of 5 cover `[0, 30)`; the rest place nothing.
pub const PROP_ROLL_BAND: u32 = 5;
