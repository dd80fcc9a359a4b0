//! Pickups domain: items that unlock player capabilities.

mod components;
mod systems;


use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::CombatSet;
use crate::core::SimSet;

pub use components::{CapabilityFlags, DropsPickup, Pickup, PickupKind, PickupSensor};
pub use systems::{pickup_color, spawn_dropped_pickup, spawn_placed_pickup};

#[derive(Debug, Clone)]
pub struct PickupCollected {
    pub pickup: Entity,
    pub collector: Entity,
    pub kind: PickupKind,
    pub newly_granted: bool,
}

impl Message for PickupCollected {}

pub struct PickupsPlugin;

impl Plugin for PickupsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PickupCollected>()
            .add_systems(
                FixedPostUpdate,
                (systems::track_pickup_landing, systems::collect_pickups)
                    .chain()
                    .in_set(SimSet::Resolve),
            )
            .add_systems(
                FixedPostUpdate,
                systems::spawn_enemy_drops
                    .after(CombatSet::Hits)
                    .before(CombatSet::Deaths)
                    .in_set(SimSet::Resolve),
            );
    }
}
