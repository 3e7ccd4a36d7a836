// ---------------------------------------------------------------------------
// MapGenError: rejected map parameters
// ---------------------------------------------------------------------------

use std::fmt;

use crate::config::MAX_GRID_CELLS;

/// Errors raised when map parameters cannot describe a map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapGenError {
    /// Width or height was zero.
    ZeroDimension { width: usize, height: usize },
    /// `width * height` overflows or exceeds `MAX_GRID_CELLS`.
    TooLarge { width: usize, height: usize },
    /// Tile size was zero, negative or not finite.
    InvalidTileSize(f32),
    /// Terrain and prop layers were built with different dimensions.
    LayerSizeMismatch {
        terrain: (usize, usize),
        props: (usize, usize),
    },
    /// A config file could not be parsed.
    Parse(String),
}

impl fmt::Display for MapGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapGenError::ZeroDimension { width, height } => {
                write!(f, "Map dimensions must be at least 1x1, got {width}x{height}")
            }
            MapGenError::TooLarge { width, height } => write!(
                f,
                "Map of {width}x{height} tiles exceeds the limit of {} cells",
                MAX_GRID_CELLS
            ),
            MapGenError::InvalidTileSize(size) => {
                write!(f, "Tile size must be a positive number of pixels, got {size}")
            }
            MapGenError::LayerSizeMismatch { terrain, props } => write!(
                f,
                "Layer size mismatch: terrain is {}x{}, props are {}x{}",
                terrain.0, terrain.1, props.0, props.1
            ),
            MapGenError::Parse(msg) => write!(f, "Config parse error: {msg}"),
        }
    }
}

impl std::error::Error for MapGenError {}

impl From<serde_json::Error> for MapGenError {
    fn from(e: serde_json::Error) -> Self {
        MapGenError::Parse(e.to_string())
    }
}
