mod common;

use ari_sim::combat::{Dead, Enemy, Health, HitFilter, HitPolicy, Projectile, Team};
use ari_sim::content::{ContentRegistry, DropDef, ProjectileDef};
use ari_sim::movement::Player;
use ari_sim::pickups::{Pickup, PickupKind};
use avian2d::prelude::*;
use bevy::prelude::*;

/// Default arena: the sentry stands out of sight range of the player.
fn quiet_app() -> App {
    let mut registry = ContentRegistry::default();
    if let Some(sentry) = registry.enemies.get_mut("sentry") {
        sentry.drop = Some(DropDef {
            kind: PickupKind::SecondaryAttack,
            scatter: 1.0,
            pop_speed: 3.0,
        });
    }
    let mut app = common::app_headless(Some(registry));
    common::boot(&mut app);
    app
}

/// Spawns a player shot resting on `target` and reports the contact.
fn shoot(app: &mut App, target: Entity) -> Entity {
    let player = common::single::<Player>(app).expect("player");
    let world = app.world_mut();
    let position = world
        .get::<Transform>(target)
        .map_or(Vec3::ZERO, |t| t.translation);
    let def = ProjectileDef::default();
    let projectile = world
        .spawn((
            Projectile::new(
                player,
                Vec2::X,
                &def,
                HitFilter::for_team(Team::Player, HitPolicy::Opponents),
            ),
            Transform::from_translation(position),
        ))
        .id();
    world.write_message(CollisionStart {
        collider1: projectile,
        collider2: target,
        body1: Some(projectile),
        body2: Some(target),
    });
    projectile
}

fn hp(app: &App, entity: Entity) -> Option<u32> {
    app.world().get::<Health>(entity).map(|h| h.current)
}

#[test]
fn player_shot_damages_enemy_and_is_removed() {
    let mut app = quiet_app();
    let enemy = common::single::<Enemy>(&mut app).expect("enemy");
    let full = hp(&app, enemy).expect("enemy health");

    let projectile = shoot(&mut app, enemy);
    common::step(&mut app, 3);

    assert_eq!(hp(&app, enemy), Some(full - 1));
    assert!(app.world().get_entity(projectile).is_err());
}

#[test]
fn lethal_shot_drops_pickup_and_clears_enemy() {
    let mut app = quiet_app();
    let enemy = common::single::<Enemy>(&mut app).expect("enemy");
    if let Some(mut health) = app.world_mut().get_mut::<Health>(enemy) {
        health.current = 1;
    }

    shoot(&mut app, enemy);
    common::step(&mut app, 3);

    assert!(app.world().get::<Dead>(enemy).is_some());
    assert!(app.world().get::<RigidBodyDisabled>(enemy).is_some());
    let pickup = common::single::<Pickup>(&mut app).expect("dropped pickup");
    assert_eq!(
        app.world().get::<Pickup>(pickup).map(|p| (p.kind, p.requires_landing)),
        Some((PickupKind::SecondaryAttack, true))
    );

    // Death cleanup finishes well within two seconds.
    common::step(&mut app, 120);
    assert!(app.world().get_entity(enemy).is_err());
    assert_eq!(common::count::<Enemy>(&mut app), 0);
}
