//! Arena domain: spawning ground, ladders, pickups and actors.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::spawn_enemy;
use crate::content::{ContentRegistry, SlabDef};
use crate::movement::{Climbable, GameLayer, Ground, Player, spawn_player};
use crate::pickups::spawn_placed_pickup;

/// Marker for static level geometry.
#[derive(Component, Debug)]
pub struct ArenaEntity;

fn slab(def: &SlabDef) -> (Vec2, Vec2) {
    (Vec2::from_array(def.center), Vec2::from_array(def.size))
}

/// Spawns the whole arena and returns the player entity. Enemies target the
/// player; placements naming unknown enemies are skipped with a warning.
pub fn spawn_arena(commands: &mut Commands, registry: &ContentRegistry) -> Entity {
    let arena = &registry.arena;

    for def in &arena.ground {
        let (center, size) = slab(def);
        commands.spawn((
            ArenaEntity,
            Ground,
            Name::new("Ground"),
            Sprite {
                color: Color::srgb(0.3, 0.3, 0.35),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(-1.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
        ));
    }

    for def in &arena.ladders {
        let (center, size) = slab(def);
        commands.spawn((
            ArenaEntity,
            Climbable,
            Name::new("Ladder"),
            Sprite {
                color: Color::srgba(0.6, 0.45, 0.2, 0.6),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(-0.5)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Ladder, [GameLayer::Player]),
        ));
    }

    for placement in &arena.pickups {
        spawn_placed_pickup(commands, placement.kind, Vec2::from_array(placement.position));
    }

    let player = spawn_player(commands, &registry.player, Vec2::from_array(arena.player_spawn));

    for placement in &arena.enemies {
        let Some(def) = registry.enemy(&placement.enemy_id) else {
            warn!(
                "Arena '{}' places unknown enemy '{}', skipping",
                arena.id, placement.enemy_id
            );
            continue;
        };
        spawn_enemy(commands, def, Vec2::from_array(placement.position), Some(player));
    }

    info!(
        "Arena '{}' spawned: {} ground slabs, {} ladders, {} pickups, {} enemies",
        arena.id,
        arena.ground.len(),
        arena.ladders.len(),
        arena.pickups.len(),
        arena.enemies.len()
    );

    player
}

pub(crate) fn spawn_arena_on_enter(
    mut commands: Commands,
    registry: Option<Res<ContentRegistry>>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping arena spawn");
        return;
    }

    match registry {
        Some(registry) => {
            spawn_arena(&mut commands, &registry);
        }
        None => {
            warn!("ContentRegistry not available, spawning built-in arena");
            spawn_arena(&mut commands, &ContentRegistry::default());
        }
    }
}
