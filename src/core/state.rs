//! Core domain: game state definitions for the simulation flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content is loaded here; nothing is simulated yet.
    #[default]
    Boot,
    Run,
}

/// Ordered phases of one physics step.
///
/// `Sense`, `Decide` and `Act` run in `FixedUpdate` before the physics engine
/// integrates; `Resolve` and `Cleanup` run in `FixedPostUpdate` once collision
/// messages for the step have been written.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Ground checks, trigger zones, timers.
    Sense,
    /// Enemy decisions and fire intents.
    Decide,
    /// Velocity commands, emitters, projectile flight.
    Act,
    /// Projectile hits, damage effects, pickups.
    Resolve,
    /// Death sequencing and removal.
    Cleanup,
}
