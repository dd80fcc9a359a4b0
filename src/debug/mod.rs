//! Debug tools for fast iteration (`dev-tools` feature).
//!
//! Features:
//! - F3 logs a JSON snapshot of the player's simulation state
//! - F4 grants every capability

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;
use serde::Serialize;

use crate::combat::Health;
use crate::core::GameState;
use crate::movement::{LocomotionState, Player};
use crate::pickups::{CapabilityFlags, PickupKind};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub snapshots_taken: u32,
}

/// Serializable view of the player for the snapshot log.
#[derive(Debug, Serialize)]
pub struct PlayerSnapshot<'a> {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub locomotion: &'a LocomotionState,
    pub health: &'a Health,
    pub capabilities: &'a CapabilityFlags,
}

impl PlayerSnapshot<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (log_player_snapshot, grant_all_capabilities)
                .run_if(in_state(GameState::Run))
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}

fn log_player_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugState>,
    query: Query<
        (
            &Transform,
            &LinearVelocity,
            &LocomotionState,
            &Health,
            &CapabilityFlags,
        ),
        With<Player>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    let Ok((transform, velocity, locomotion, health, capabilities)) = query.single() else {
        warn!("Snapshot requested but no player exists");
        return;
    };

    let snapshot = PlayerSnapshot {
        position: transform.translation.truncate().to_array(),
        velocity: velocity.0.to_array(),
        locomotion,
        health,
        capabilities,
    };

    match snapshot.to_json() {
        Ok(json) => {
            state.snapshots_taken += 1;
            info!("Player snapshot #{}:\n{}", state.snapshots_taken, json);
        }
        Err(e) => error!("Failed to serialize player snapshot: {}", e),
    }
}

fn grant_all_capabilities(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut CapabilityFlags, With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::F4) {
        return;
    }

    for mut flags in &mut query {
        for kind in [PickupKind::ElevatedJump, PickupKind::SecondaryAttack] {
            flags.grant(kind);
        }
        info!("Debug: granted all capabilities");
    }
}
