use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::content::{AttackDef, DeliveryDef, HealthDef, ProjectileDef};
use crate::core::test_utils::{insert_time_with_delta, run_system_once};
use crate::movement::{Facing, GameLayer};
use crate::sprites::{AnimationCue, CueKind};

const DT: f32 = 1.0 / 60.0;

fn hit(amount: i32) -> Hit {
    Hit {
        amount,
        point: Vec2::ZERO,
        normal: Vec2::X,
    }
}

fn ranges(sight: f32, attack: f32, chase: f32) -> EnemyRanges {
    EnemyRanges {
        sight,
        attack,
        chase,
    }
}

fn combat_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<DamageEvent>>();
    world.init_resource::<Messages<DeathEvent>>();
    world.init_resource::<Messages<DeathAnimationFinished>>();
    world.init_resource::<Messages<AnimationCue>>();
    insert_time_with_delta(&mut world, DT);
    world
}

fn spawn_target(world: &mut World, layer: GameLayer, max_hp: u32) -> Entity {
    world
        .spawn((
            Health::new(max_hp, 0.2),
            CollisionLayers::new(layer, LayerMask::ALL),
            Transform::default(),
        ))
        .id()
}

fn spawn_projectile_entity(world: &mut World, owner: Entity, team: Team, def: &ProjectileDef) -> Entity {
    let filter = HitFilter::for_team(team, def.targets);
    world
        .spawn((
            Projectile::new(owner, Vec2::X, def, filter),
            Transform::from_xyz(1.0, 0.0, 0.0),
        ))
        .id()
}

fn collide(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: None,
        body2: Some(b),
    });
}

fn drain<T: bevy::ecs::message::Message>(world: &mut World) -> Vec<T> {
    world.resource_mut::<Messages<T>>().drain().collect()
}

// --- Health ---------------------------------------------------------------

#[test]
fn damage_starts_invulnerability_immediately() {
    let mut health = Health::new(3, 0.2);

    assert_eq!(health.apply_damage(1), DamageOutcome::Hurt { remaining: 2 });
    assert!(health.is_invulnerable());
    assert_eq!(health.apply_damage(1), DamageOutcome::Ignored);
    assert_eq!(health.current, 2);

    health.tick(0.25);
    assert_eq!(health.apply_damage(1), DamageOutcome::Hurt { remaining: 1 });
}

#[test]
fn damage_is_at_least_one_point() {
    let mut health = Health::new(3, 0.0);
    assert_eq!(health.apply_damage(0), DamageOutcome::Hurt { remaining: 2 });
    assert_eq!(health.apply_damage(-5), DamageOutcome::Hurt { remaining: 1 });
}

#[test]
fn death_is_terminal() {
    let mut health = Health::new(2, 0.0);
    assert_eq!(health.apply_damage(10), DamageOutcome::Killed);
    assert_eq!(health.current, 0);
    assert!(health.dead);
    assert_eq!(health.apply_damage(1), DamageOutcome::Ignored);
    assert_eq!(health.current, 0);
}

#[test]
fn zero_max_hp_is_raised_to_one() {
    let health = Health::from_def(&HealthDef {
        max_hp: 0,
        ..default()
    });
    assert_eq!(health.max, 1);
    assert_eq!(health.current, 1);
}

// --- Projectile -----------------------------------------------------------

#[test]
fn projectile_expires_at_travel_budget() {
    let def = ProjectileDef {
        speed: 18.0,
        max_distance: 8.0,
        ..default()
    };
    let owner = Entity::PLACEHOLDER;
    let mut projectile = Projectile::new(owner, Vec2::X, &def, HitFilter::Mask(LayerMask::ALL));

    let mut steps = 0;
    while projectile.advance(DT) == Flight::InFlight {
        steps += 1;
        assert!(projectile.traveled <= projectile.max_distance);
        assert!(steps < 1000);
    }
    assert_eq!(projectile.traveled, 8.0);
    assert_eq!(projectile.progress(), 1.0);
    // 8 / 18 seconds at 60 Hz
    assert_eq!(steps + 1, 27);
}

#[test]
fn zero_direction_defaults_to_positive_x() {
    assert_eq!(launch_direction(Vec2::ZERO), Vec2::X);
    assert_eq!(launch_direction(Vec2::new(0.0, -3.0)), Vec2::NEG_Y);
}

#[test]
fn hit_filter_policies() {
    let opponents = HitFilter::for_team(Team::Player, HitPolicy::Opponents);
    assert!(opponents.accepts(GameLayer::Enemy.into()));
    assert!(!opponents.accepts(GameLayer::Ground.into()));
    assert!(!opponents.accepts(GameLayer::Player.into()));

    let any = HitFilter::for_team(Team::Player, HitPolicy::AnyButOwner);
    assert!(any.accepts(GameLayer::Enemy.into()));
    assert!(any.accepts(GameLayer::Ground.into()));
    assert!(!any.accepts(GameLayer::Player.into()));
}

#[test]
fn despawn_policy_follows_outcome() {
    let def = ProjectileDef {
        despawn: HitDespawn::OnDamage,
        ..default()
    };
    let projectile = Projectile::new(Entity::PLACEHOLDER, Vec2::X, &def, HitFilter::Mask(LayerMask::ALL));
    assert!(!projectile.despawns_after(DamageOutcome::Ignored));
    assert!(!projectile.despawns_after(DamageOutcome::NoTarget));
    assert!(projectile.despawns_after(DamageOutcome::Killed));
}

// --- Emitter --------------------------------------------------------------

#[test]
fn attack_slot_cooldown_uses_fire_rate() {
    let mut slot = AttackSlot::new(AttackDef {
        fire_rate: 4.0,
        ..default()
    });
    assert!(slot.trigger());
    assert!(!slot.trigger());
    assert_eq!(slot.cooldown, 0.25);

    slot.tick(0.25);
    assert!(slot.trigger());

    let mut zero_rate = AttackSlot::new(AttackDef {
        fire_rate: 0.0,
        ..default()
    });
    assert!((zero_rate.interval() - 100.0).abs() < 1e-3);
    assert!(zero_rate.trigger());
}

#[test]
fn spawn_origin_clears_the_body() {
    let right = spawn_origin(Vec2::new(1.0, 2.0), [0.0, 0.1], Facing::Right, 0.3, 0.08);
    assert!((right - Vec2::new(1.38, 2.1)).length() < 1e-5);

    let left = spawn_origin(Vec2::new(1.0, 2.0), [0.2, 0.0], Facing::Left, 0.3, 0.08);
    assert!((left - Vec2::new(0.42, 2.0)).length() < 1e-5);
}

// --- Enemy decisions ------------------------------------------------------

#[test]
fn fires_inside_attack_radius_without_chasing() {
    let brain = EnemyBrain::new(ranges(10.0, 6.0, 4.0), EnemyMotion::default(), None);
    let decision = decide(&brain, Vec2::ZERO, Some(Vec2::new(5.0, 0.0)), 0.0, DT);

    assert!(decision.fire);
    assert_eq!(decision.velocity_x, 0.0);
    assert_eq!(decision.mode, EnemyMode::Attack);
    assert_eq!(decision.facing, Some(Facing::Right));
}

#[test]
fn chases_inside_chase_radius_and_stops_short() {
    let motion = EnemyMotion::default();
    let brain = EnemyBrain::new(ranges(10.0, 6.0, 4.0), motion, None);

    let decision = decide(&brain, Vec2::ZERO, Some(Vec2::new(-3.0, 0.0)), 0.0, DT);
    assert!(decision.velocity_x < 0.0);
    assert_eq!(decision.facing, Some(Facing::Left));

    let decision = decide(&brain, Vec2::ZERO, Some(Vec2::new(1.0, 0.0)), 1.0, DT);
    assert!(decision.velocity_x < 1.0);
    assert!(decision.fire);
}

#[test]
fn hit_stun_suspends_walking() {
    let mut brain = EnemyBrain::new(ranges(10.0, 6.0, 4.0), EnemyMotion::default(), None);
    brain.set_movement_enabled(false);

    let decision = decide(&brain, Vec2::ZERO, Some(Vec2::new(3.0, 0.0)), 0.0, DT);
    assert_eq!(decision.velocity_x, 0.0);
    assert!(decision.fire);
}

#[test]
fn ignores_target_beyond_sight_or_missing() {
    let brain = EnemyBrain::new(ranges(5.0, 4.0, 3.0), EnemyMotion::default(), None);

    let far = decide(&brain, Vec2::ZERO, Some(Vec2::new(8.0, 0.0)), 2.0, DT);
    assert_eq!(far.mode, EnemyMode::Idle);
    assert!(!far.fire);
    assert!(far.velocity_x < 2.0);

    let missing = decide(&brain, Vec2::ZERO, None, 0.0, DT);
    assert!(!missing.fire);
    assert_eq!(missing.velocity_x, 0.0);
}

#[test]
fn metric_changes_measured_distance() {
    let horizontal = EnemyBrain::new(ranges(10.0, 2.0, 0.0), EnemyMotion::default(), None);
    let euclidean = EnemyBrain::new(
        ranges(10.0, 2.0, 0.0),
        EnemyMotion {
            metric: DistanceMetric::Euclidean,
            ..default()
        },
        None,
    );
    let target = Some(Vec2::new(1.0, 5.0));

    assert!(decide(&horizontal, Vec2::ZERO, target, 0.0, DT).fire);
    assert!(!decide(&euclidean, Vec2::ZERO, target, 0.0, DT).fire);
}

#[test]
fn ranges_are_clamped_into_order() {
    let messy = ranges(3.0, 6.0, 8.0);
    assert!(!messy.is_ordered());

    let ordered = messy.ordered();
    assert!(ordered.is_ordered());
    assert_eq!(ordered, ranges(6.0, 6.0, 6.0));
    assert!(ranges(10.0, 6.0, 4.0).is_ordered());
}

// --- Systems --------------------------------------------------------------

#[test]
fn projectile_damages_opponent_and_despawns() {
    let mut world = combat_world();
    let shooter = world.spawn(Transform::default()).id();
    let enemy = spawn_target(&mut world, GameLayer::Enemy, 3);
    let projectile = spawn_projectile_entity(&mut world, shooter, Team::Player, &ProjectileDef::default());

    collide(&mut world, projectile, enemy);
    run_system_once(&mut world, systems::resolve_projectile_hits);

    assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(2));
    assert!(world.get_entity(projectile).is_err());

    let events = drain::<DamageEvent>(&mut world);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, shooter);
    assert_eq!(events[0].normal, Vec2::X);
    assert!(!events[0].lethal);
}

#[test]
fn projectile_never_hits_its_owner() {
    let mut world = combat_world();
    let enemy = spawn_target(&mut world, GameLayer::Enemy, 3);
    let projectile = spawn_projectile_entity(
        &mut world,
        enemy,
        Team::Player,
        &ProjectileDef {
            targets: HitPolicy::AnyButOwner,
            ..default()
        },
    );

    collide(&mut world, projectile, enemy);
    run_system_once(&mut world, systems::resolve_projectile_hits);

    assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(3));
    assert!(world.get_entity(projectile).is_ok());
}

#[test]
fn projectile_ignores_layers_outside_its_mask() {
    let mut world = combat_world();
    let shooter = world.spawn(Transform::default()).id();
    let ally = spawn_target(&mut world, GameLayer::Enemy, 3);
    let projectile = spawn_projectile_entity(&mut world, shooter, Team::Enemy, &ProjectileDef::default());

    collide(&mut world, projectile, ally);
    run_system_once(&mut world, systems::resolve_projectile_hits);

    assert_eq!(world.get::<Health>(ally).map(|h| h.current), Some(3));
    assert!(world.get_entity(projectile).is_ok());
}

#[test]
fn second_hit_in_same_step_is_ignored() {
    let mut world = combat_world();
    let shooter = world.spawn(Transform::default()).id();
    let enemy = spawn_target(&mut world, GameLayer::Enemy, 3);
    let piercing = ProjectileDef {
        despawn: HitDespawn::OnDamage,
        ..default()
    };
    let first = spawn_projectile_entity(&mut world, shooter, Team::Player, &piercing);
    let second = spawn_projectile_entity(&mut world, shooter, Team::Player, &piercing);

    collide(&mut world, first, enemy);
    collide(&mut world, second, enemy);
    run_system_once(&mut world, systems::resolve_projectile_hits);

    assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(2));
    assert!(world.get_entity(first).is_err());
    assert!(world.get_entity(second).is_ok());
}

#[test]
fn lethal_hit_emits_death_and_starts_cleanup() {
    let mut world = combat_world();
    let shooter = world.spawn(Transform::default()).id();
    let enemy = spawn_target(&mut world, GameLayer::Enemy, 1);
    world.entity_mut(enemy).insert((
        DamageResponse {
            knockback_force: 0.0,
            hit_stun: 0.0,
            death_cleanup_delay: 1.0,
        },
        LinearVelocity(Vec2::new(3.0, 1.0)),
        EnemyBrain::new(ranges(10.0, 6.0, 4.0), EnemyMotion::default(), None),
        Emitter::new(AttackDef::default(), None),
    ));
    let projectile = spawn_projectile_entity(&mut world, shooter, Team::Player, &ProjectileDef::default());

    collide(&mut world, projectile, enemy);
    run_system_once(&mut world, systems::resolve_projectile_hits);
    run_system_once(&mut world, systems::begin_deaths);

    assert!(world.get::<Dead>(enemy).is_some());
    assert!(world.get::<RigidBodyDisabled>(enemy).is_some());
    assert_eq!(world.get::<LinearVelocity>(enemy).map(|v| v.0), Some(Vec2::ZERO));
    assert_eq!(world.get::<EnemyBrain>(enemy).map(|b| b.enabled), Some(false));
    assert_eq!(world.get::<Emitter>(enemy).map(|e| e.enabled), Some(false));

    let cues: Vec<CueKind> = drain::<AnimationCue>(&mut world).iter().map(|c| c.cue).collect();
    assert_eq!(cues, vec![CueKind::Death]);

    // Fallback timer removes the body.
    insert_time_with_delta(&mut world, 0.6);
    run_system_once(&mut world, systems::tick_death_cleanup);
    assert!(world.get_entity(enemy).is_ok());
    run_system_once(&mut world, systems::tick_death_cleanup);
    assert!(world.get_entity(enemy).is_err());
}

#[test]
fn zero_cleanup_delay_removes_immediately() {
    let mut world = combat_world();
    let target = world
        .spawn(DamageResponse {
            knockback_force: 0.0,
            hit_stun: 0.0,
            death_cleanup_delay: 0.0,
        })
        .id();
    world.write_message(DeathEvent {
        entity: target,
        killer: Entity::PLACEHOLDER,
    });

    run_system_once(&mut world, systems::begin_deaths);
    assert!(world.get_entity(target).is_err());
}

#[test]
fn death_animation_finished_ends_countdown_early() {
    let mut world = combat_world();
    let body = world.spawn((Dead, DeathCleanup { remaining: 5.0 })).id();
    world.write_message(DeathAnimationFinished { entity: body });

    run_system_once(&mut world, systems::tick_death_cleanup);
    assert!(world.get_entity(body).is_err());
}

#[test]
fn non_lethal_hit_applies_knockback_and_stun() {
    let mut world = combat_world();
    let enemy = world
        .spawn((
            DamageResponse {
                knockback_force: 3.0,
                hit_stun: 0.25,
                death_cleanup_delay: 1.0,
            },
            LinearVelocity::default(),
            HitStun::default(),
            EnemyBrain::new(ranges(10.0, 6.0, 4.0), EnemyMotion::default(), None),
        ))
        .id();
    world.write_message(DamageEvent {
        source: Entity::PLACEHOLDER,
        target: enemy,
        amount: 1,
        point: Vec2::ZERO,
        normal: Vec2::X,
        lethal: false,
    });

    run_system_once(&mut world, systems::react_to_damage);

    assert_eq!(world.get::<LinearVelocity>(enemy).map(|v| v.x), Some(3.0));
    assert_eq!(world.get::<HitStun>(enemy).map(|s| s.remaining), Some(0.25));
    assert_eq!(world.get::<EnemyBrain>(enemy).map(|b| b.movement_enabled()), Some(false));

    insert_time_with_delta(&mut world, 0.3);
    run_system_once(&mut world, systems::tick_combat_timers);
    assert_eq!(world.get::<EnemyBrain>(enemy).map(|b| b.movement_enabled()), Some(true));
}

#[test]
fn emitter_spawns_projectile_and_respects_cooldown() {
    let mut world = combat_world();
    let def = AttackDef::default();
    let shooter = world
        .spawn((
            Transform::from_xyz(0.0, 0.0, 0.0),
            Collider::rectangle(0.6, 1.1),
            Facing::Left,
            Team::Player,
            Emitter::new(def, None),
            FireIntent {
                primary: true,
                ..default()
            },
        ))
        .id();

    run_system_once(&mut world, systems::fire_emitters);

    let mut query = world.query::<(&Projectile, &Transform)>();
    let shots: Vec<(Vec2, Vec2, Entity)> = query
        .iter(&world)
        .map(|(p, t)| (p.direction, t.translation.truncate(), p.owner))
        .collect();
    assert_eq!(shots.len(), 1);
    let (direction, origin, owner) = shots[0];
    assert_eq!(direction, Vec2::NEG_X);
    assert!(origin.x < -0.3);
    assert_eq!(owner, shooter);
    assert_eq!(world.get::<FireIntent>(shooter).map(|i| i.primary), Some(false));

    world.entity_mut(shooter).insert(FireIntent {
        primary: true,
        ..default()
    });
    run_system_once(&mut world, systems::fire_emitters);
    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 1);
}

#[test]
fn contact_attack_damages_target_in_reach() {
    let mut world = combat_world();
    let player = world
        .spawn((Health::new(3, 0.2), Transform::from_xyz(1.0, 0.0, 0.0)))
        .id();
    let brute = world
        .spawn((
            Transform::default(),
            Collider::rectangle(0.9, 0.8),
            Facing::Right,
            Team::Enemy,
            Emitter::new(
                AttackDef {
                    delivery: DeliveryDef::Contact {
                        reach: 1.2,
                        damage: 1,
                    },
                    ..default()
                },
                None,
            ),
            FireIntent {
                primary: true,
                target: Some(player),
                ..default()
            },
        ))
        .id();

    run_system_once(&mut world, systems::fire_emitters);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(2));
    let events = drain::<DamageEvent>(&mut world);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, brute);
}

#[test]
fn contact_attack_out_of_reach_keeps_cooldown_ready() {
    let mut world = combat_world();
    let player = world
        .spawn((Health::new(3, 0.2), Transform::from_xyz(3.0, 0.0, 0.0)))
        .id();
    let melee = AttackDef {
        delivery: DeliveryDef::Contact {
            reach: 1.2,
            damage: 1,
        },
        ..default()
    };
    let brute = world
        .spawn((
            Transform::default(),
            Collider::rectangle(0.9, 0.8),
            Facing::Right,
            Team::Enemy,
            Emitter::new(melee, None),
            FireIntent {
                primary: true,
                target: Some(player),
                ..default()
            },
        ))
        .id();

    run_system_once(&mut world, systems::fire_emitters);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(3));
    assert_eq!(world.get::<Emitter>(brute).map(|e| e.primary.ready()), Some(true));
    assert!(drain::<AnimationCue>(&mut world).is_empty());

    // Target steps into reach; the very next swing lands.
    if let Some(mut transform) = world.get_mut::<Transform>(player) {
        transform.translation.x = 1.0;
    }
    world.entity_mut(brute).insert(FireIntent {
        primary: true,
        target: Some(player),
        ..default()
    });
    run_system_once(&mut world, systems::fire_emitters);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(2));
    assert_eq!(world.get::<Emitter>(brute).map(|e| e.primary.ready()), Some(false));
}

#[test]
fn contact_attack_without_target_keeps_cooldown_ready() {
    let mut world = combat_world();
    let brute = world
        .spawn((
            Transform::default(),
            Collider::rectangle(0.9, 0.8),
            Facing::Right,
            Team::Enemy,
            Emitter::new(
                AttackDef {
                    delivery: DeliveryDef::Contact {
                        reach: 1.2,
                        damage: 1,
                    },
                    ..default()
                },
                None,
            ),
            FireIntent {
                primary: true,
                ..default()
            },
        ))
        .id();

    run_system_once(&mut world, systems::fire_emitters);

    assert_eq!(world.get::<Emitter>(brute).map(|e| e.primary.ready()), Some(true));
}

#[test]
fn missing_target_warning_latches_per_enemy() {
    let mut world = combat_world();
    let enemy = world
        .spawn((
            Enemy,
            Transform::default(),
            EnemyBrain::new(ranges(10.0, 6.0, 4.0), EnemyMotion::default(), None),
            FireIntent::default(),
            LinearVelocity::default(),
            Facing::Right,
        ))
        .id();
    let warned = |world: &World| world.get::<EnemyBrain>(enemy).map(|b| b.target_warned());

    run_system_once(&mut world, ai::run_enemy_brains);
    assert_eq!(warned(&world), Some(true));

    let target = world.spawn(Transform::from_xyz(20.0, 0.0, 0.0)).id();
    if let Some(mut brain) = world.get_mut::<EnemyBrain>(enemy) {
        brain.target = Some(target);
    }
    run_system_once(&mut world, ai::run_enemy_brains);
    assert_eq!(warned(&world), Some(false));

    world.despawn(target);
    run_system_once(&mut world, ai::run_enemy_brains);
    assert_eq!(warned(&world), Some(true));
}
