//! Movement domain: player bootstrap from content data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{DamageResponse, Emitter, FireIntent, Health, Team};
use crate::content::PlayerDef;
use crate::movement::{
    ClimbZoneContact, Facing, GameLayer, GroundSensor, LocomotionState, Player,
};
use crate::pickups::CapabilityFlags;
use crate::sprites::{AnimationParams, CuePlayback, CueClips};

/// Spawns the player at `position` using the given definition.
pub fn spawn_player(commands: &mut Commands, def: &PlayerDef, position: Vec2) -> Entity {
    let [r, g, b] = def.color;
    let size = Vec2::new(def.body.width, def.body.height);

    info!(
        "Spawning player: hp={}, walk={}, run={}, jump={}",
        def.health.max_hp,
        def.locomotion.walk_speed,
        def.locomotion.run_speed,
        def.locomotion.jump_impulse
    );

    commands
        .spawn((
            // Identity & Movement
            (
                Player,
                Name::new("Player"),
                Team::Player,
                def.locomotion.clone(),
                LocomotionState::default(),
                GroundSensor::default(),
                ClimbZoneContact::default(),
                Facing::Right,
                CapabilityFlags::default(),
            ),
            // Combat
            (
                Health::from_def(&def.health),
                DamageResponse::from_def(&def.health),
                Emitter::new(def.primary.clone(), Some(def.secondary.clone())),
                FireIntent::default(),
            ),
            // Rendering
            (
                Sprite {
                    color: Color::srgb(r, g, b),
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_translation(position.extend(0.0)),
                AnimationParams::default(),
                CueClips::all(),
                CuePlayback::default(),
            ),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.x, size.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Locomotion applies its own gravity
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Ladder,
                        GameLayer::Pickup,
                        GameLayer::EnemyProjectile,
                    ],
                ),
            ),
        ))
        .id()
}
