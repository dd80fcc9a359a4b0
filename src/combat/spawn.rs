//! Combat domain: enemy spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{
    DamageResponse, Emitter, Enemy, EnemyBrain, FireIntent, Health, HitStun, Team,
};
use crate::content::EnemyDef;
use crate::movement::{Facing, GameLayer};
use crate::pickups::DropsPickup;
use crate::sprites::{AnimationParams, CueClips, CuePlayback};

/// Bundle for spawning an enemy from its content definition
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub name: Name,
    pub team: Team,
    pub health: Health,
    pub response: DamageResponse,
    pub stun: HitStun,
    pub brain: EnemyBrain,
    pub intent: FireIntent,
    pub emitter: Emitter,
    pub facing: Facing,
    pub params: AnimationParams,
    pub clips: CueClips,
    pub playback: CuePlayback,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
}

impl EnemyBundle {
    pub fn new(def: &EnemyDef, position: Vec2, target: Option<Entity>) -> Self {
        let ranges = if def.ranges.is_ordered() {
            def.ranges
        } else {
            let ordered = def.ranges.ordered();
            warn!(
                "Enemy '{}' ranges out of order ({:?}), clamped to {:?}",
                def.id, def.ranges, ordered
            );
            ordered
        };
        let [r, g, b] = def.color;

        Self {
            enemy: Enemy,
            name: Name::new(def.name.clone()),
            team: Team::Enemy,
            health: Health::from_def(&def.health),
            response: DamageResponse::from_def(&def.health),
            stun: HitStun::default(),
            brain: EnemyBrain::new(ranges, def.motion, target),
            intent: FireIntent::default(),
            emitter: Emitter::new(def.attack.clone(), None),
            facing: Facing::Left,
            params: AnimationParams::default(),
            clips: CueClips::all(),
            playback: CuePlayback::default(),
            sprite: Sprite {
                color: Color::srgb(r, g, b),
                custom_size: Some(Vec2::new(def.body.width, def.body.height)),
                ..default()
            },
            transform: Transform::from_translation(position.extend(0.0)),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(def.body.width, def.body.height),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::PlayerProjectile],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

pub fn spawn_enemy(
    commands: &mut Commands,
    def: &EnemyDef,
    position: Vec2,
    target: Option<Entity>,
) -> Entity {
    let mut entity = commands.spawn(EnemyBundle::new(def, position, target));
    if let Some(drop) = &def.drop {
        entity.insert(DropsPickup(drop.clone()));
    }
    info!("Spawned enemy '{}' at {:?}", def.id, position);
    entity.id()
}
