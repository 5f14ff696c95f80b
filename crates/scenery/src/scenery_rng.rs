//! Seedable RNG resource for decoration choices.
//!
//! Wraps `ChaCha8Rng` so that identical seeds produce identical roadside
//! layouts. Systems take `ResMut<SceneryRng>` instead of `rand::thread_rng()`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seed used when the host does not provide one.
const DEFAULT_SEED: u64 = 42;

/// Deterministic RNG resource for catalog selection and placement.
#[derive(Resource)]
pub struct SceneryRng(pub ChaCha8Rng);

impl Default for SceneryRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SceneryRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
