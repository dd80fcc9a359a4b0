//! Movement domain: player locomotion, ground sensing and climbing.

mod bootstrap;
mod components;
pub mod locomotion;
mod resources;
mod systems;


use bevy::prelude::*;

use crate::core::{GameState, SimSet};

pub use bootstrap::spawn_player;
pub use components::*;
pub use resources::MovementIntent;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementIntent>()
            .add_systems(
                Update,
                systems::read_input
                    .run_if(in_state(GameState::Run))
                    .run_if(resource_exists::<ButtonInput<KeyCode>>),
            )
            .add_systems(
                FixedUpdate,
                (systems::detect_ground, systems::track_climb_zones).in_set(SimSet::Sense),
            )
            .add_systems(FixedUpdate, systems::apply_locomotion.in_set(SimSet::Act));
    }
}
