//! Core domain: game states, step phases, pausing and shared resources.

pub mod resources;
pub mod state;
pub mod systems;
#[cfg(test)]
pub mod test_utils;

pub use resources::{GameplayPaused, SimRng, gameplay_active};
pub use state::{GameState, SimSet};
pub use systems::setup_camera;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::core::systems::{finish_boot, sync_physics_pause, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .init_resource::<SimRng>()
            .configure_sets(
                FixedUpdate,
                (SimSet::Sense, SimSet::Decide, SimSet::Act)
                    .chain()
                    .run_if(in_state(GameState::Run).and(gameplay_active)),
            )
            .configure_sets(
                FixedPostUpdate,
                (SimSet::Resolve, SimSet::Cleanup)
                    .chain()
                    .after(CollisionEventSystems)
                    .run_if(in_state(GameState::Run).and(gameplay_active)),
            )
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(PreUpdate, sync_physics_pause)
            .add_systems(
                Update,
                toggle_pause.run_if(resource_exists::<ButtonInput<KeyCode>>),
            );
    }
}
