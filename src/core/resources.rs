//! Core domain: shared resources for pausing and deterministic randomness.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Resource tracking if the simulation should be paused.
/// The simulation is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn toggle(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }
}

/// Run condition: returns true only when the simulation is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// Seeded RNG for simulation-side randomness (item drop scatter).
#[derive(Resource, Debug)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}
