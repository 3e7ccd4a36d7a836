// ---------------------------------------------------------------------------
// MapError: tile map construction failures
// ---------------------------------------------------------------------------

use std::fmt;

use mapgen::MapGenError;

/// Errors raised while building a `TileMap` or loading its assets.
#[derive(Debug)]
pub enum MapError {
    /// Map parameters were rejected before generation.
    InvalidConfig(MapGenError),
    /// A texture or shader source could not be found or read.
    AssetUnavailable { path: String, reason: String },
    /// A shader program failed to compile or link. `TileMap` turns this into
    /// unshaded drawing instead of failing construction.
    ShaderCompile(String),
}

impl MapError {
    pub fn asset_unavailable(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        MapError::AssetUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidConfig(e) => write!(f, "Invalid map config: {e}"),
            MapError::AssetUnavailable { path, reason } => {
                write!(f, "Asset unavailable: {path} ({reason})")
            }
            MapError::ShaderCompile(msg) => write!(f, "Shader program failed: {msg}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapGenError> for MapError {
    fn from(e: MapGenError) -> Self {
        MapError::InvalidConfig(e)
    }
}
