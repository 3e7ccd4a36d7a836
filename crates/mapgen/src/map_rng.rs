//! Deterministic map generation RNG resource.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness.
//! Terrain and prop generation draw from this generator instead of
//! `rand::thread_rng()` so that identical seeds produce identical maps.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

/// Seeded RNG shared by the terrain and prop generators.
///
/// Systems that need randomness take `ResMut<MapRng>` and pass `&mut rng.0`
/// (a `ChaCha8Rng` implementing `rand::Rng`) into the generators.
#[derive(Resource)]
pub struct MapRng(pub ChaCha8Rng);

impl Default for MapRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl MapRng {
    /// Create a new `MapRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restart the stream from `seed`, as if freshly constructed.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}
