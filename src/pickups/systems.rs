//! Pickups domain: collection, landing detection and enemy drops.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::core::SimRng;
use crate::movement::{GameLayer, Ground, Player};
use crate::pickups::{
    CapabilityFlags, DropsPickup, Pickup, PickupCollected, PickupKind, PickupSensor,
};
use crate::combat::DeathEvent;

const PICKUP_SIZE: f32 = 0.4;

pub fn pickup_color(kind: PickupKind) -> Color {
    match kind {
        PickupKind::ElevatedJump => Color::srgb(0.3, 0.9, 0.5),
        PickupKind::SecondaryAttack => Color::srgb(0.4, 0.6, 1.0),
    }
}

/// Static trigger pickup placed in the level.
pub fn spawn_placed_pickup(commands: &mut Commands, kind: PickupKind, position: Vec2) -> Entity {
    commands
        .spawn((
            Pickup::placed(kind),
            Name::new(format!("Pickup {:?}", kind)),
            Sprite {
                color: pickup_color(kind),
                custom_size: Some(Vec2::splat(PICKUP_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(PICKUP_SIZE, PICKUP_SIZE),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Pickup, [GameLayer::Player]),
        ))
        .id()
}

/// Falling pickup: a solid body that lands on ground plus a sensor child
/// that detects the player.
pub fn spawn_dropped_pickup(
    commands: &mut Commands,
    kind: PickupKind,
    position: Vec2,
    velocity: Vec2,
) -> Entity {
    commands
        .spawn((
            Pickup::dropped(kind),
            Name::new(format!("Dropped {:?}", kind)),
            Sprite {
                color: pickup_color(kind),
                custom_size: Some(Vec2::splat(PICKUP_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
            RigidBody::Dynamic,
            Collider::rectangle(PICKUP_SIZE, PICKUP_SIZE),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Pickup, [GameLayer::Ground]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity(velocity),
        ))
        .with_children(|parent| {
            parent.spawn((
                PickupSensor,
                Collider::rectangle(PICKUP_SIZE, PICKUP_SIZE),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::Pickup, [GameLayer::Player]),
            ));
        })
        .id()
}

/// Marks dropped pickups as landed on their first ground contact.
pub(crate) fn track_pickup_landing(
    mut started: MessageReader<CollisionStart>,
    ground: Query<(), With<Ground>>,
    mut pickups: Query<&mut Pickup>,
) {
    for ev in started.read() {
        for (item, other) in [(ev.collider1, ev.collider2), (ev.collider2, ev.collider1)] {
            if !ground.contains(other) {
                continue;
            }
            if let Ok(mut pickup) = pickups.get_mut(item)
                && pickup.requires_landing
                && !pickup.landed
            {
                pickup.landed = true;
                debug!("Pickup {:?} landed", item);
            }
        }
    }
}

/// Grants the pickup's capability to the player that touches it. A pickup is
/// consumed at most once even with several contacts in one step.
pub(crate) fn collect_pickups(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut collected: MessageWriter<PickupCollected>,
    mut pickups: Query<&mut Pickup>,
    mut players: Query<&mut CapabilityFlags, With<Player>>,
) {
    for ev in started.read() {
        let pairs = [
            (ev.collider1, ev.body1, ev.collider2, ev.body2),
            (ev.collider2, ev.body2, ev.collider1, ev.body1),
        ];

        for (item_collider, item_body, other_collider, other_body) in pairs {
            let item = item_body.unwrap_or(item_collider);
            let collector = other_body.unwrap_or(other_collider);

            let Ok(mut pickup) = pickups.get_mut(item) else {
                continue;
            };
            let Ok(mut flags) = players.get_mut(collector) else {
                continue;
            };
            let Some(newly_granted) = pickup.collect(&mut flags) else {
                continue;
            };

            info!(
                "Pickup collected: {:?} (newly granted: {})",
                pickup.kind, newly_granted
            );
            collected.write(PickupCollected {
                pickup: item,
                collector,
                kind: pickup.kind,
                newly_granted,
            });
            commands.entity(item).despawn();
        }
    }
}

pub(crate) fn spawn_enemy_drops(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut rng: ResMut<SimRng>,
    droppers: Query<(&Transform, &DropsPickup)>,
) {
    for event in death_events.read() {
        let Ok((transform, drops)) = droppers.get(event.entity) else {
            continue;
        };
        let drop = &drops.0;
        let lateral = if drop.scatter > 0.0 {
            rng.0.random_range(-drop.scatter..=drop.scatter)
        } else {
            0.0
        };
        let position = transform.translation.truncate();
        spawn_dropped_pickup(
            &mut commands,
            drop.kind,
            position,
            Vec2::new(lateral, drop.pop_speed),
        );
        debug!("Enemy {:?} dropped {:?}", event.entity, drop.kind);
    }
}
