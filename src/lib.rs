//! Library entry point.
//!
//! The binary and the integration tests in `tests/` both build their app
//! from [`SimulationPlugin`]. Physics is added by the caller, next to the
//! fixed timestep it should run at.

pub mod arena;
pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod movement;
pub mod pickups;
pub mod sprites;

use bevy::prelude::*;

/// Every simulation domain, without rendering or physics.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            pickups::PickupsPlugin,
            sprites::SpritesPlugin,
            arena::ArenaPlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
