//! Combat domain: emitters, projectile flight, hit resolution and deaths.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::damage::DamageTargets;
use crate::combat::emitter::spawn_origin;
use crate::combat::projectile::spawn_projectile;
use crate::combat::resources::MAX_KNOCKBACK_SPEED;
use crate::combat::{
    AttackSlotKind, CombatInput, DamageEvent, DamageResponse, Dead, DeathAnimationFinished,
    DeathCleanup, DeathEvent, Emitter, EnemyBrain, FireIntent, Flight, Health, Hit, HitStun,
    Projectile, Team,
};
use crate::content::DeliveryDef;
use crate::movement::{Facing, Player};
use crate::pickups::{CapabilityFlags, PickupKind};
use crate::sprites::{AnimationCue, CueKind};

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mut input: ResMut<CombatInput>,
) {
    let mouse_primary = mouse.as_ref().is_some_and(|m| m.pressed(MouseButton::Left));
    let mouse_secondary = mouse
        .as_ref()
        .is_some_and(|m| m.just_pressed(MouseButton::Right));

    input.primary_held = keyboard.pressed(KeyCode::KeyJ) || mouse_primary;
    input.secondary_pressed |= keyboard.just_pressed(KeyCode::KeyE) || mouse_secondary;
}

/// Primary fires while held; secondary fires on a press and only once unlocked.
pub(crate) fn apply_player_fire_intent(
    mut input: ResMut<CombatInput>,
    mut query: Query<(&CapabilityFlags, &mut FireIntent), (With<Player>, Without<Dead>)>,
) {
    for (caps, mut intent) in &mut query {
        intent.primary = input.primary_held;
        intent.secondary = input.secondary_pressed && caps.has(PickupKind::SecondaryAttack);
        intent.aim_at = None;
    }
    input.secondary_pressed = false;
}

pub(crate) fn tick_combat_timers(
    time: Res<Time>,
    mut health_query: Query<&mut Health>,
    mut emitters: Query<&mut Emitter, Without<Dead>>,
    mut stunned: Query<(&mut HitStun, &mut EnemyBrain), Without<Dead>>,
) {
    let dt = time.delta_secs();

    for mut health in &mut health_query {
        health.tick(dt);
    }

    for mut emitter in &mut emitters {
        emitter.tick(dt);
    }

    for (mut stun, mut brain) in &mut stunned {
        if stun.remaining <= 0.0 {
            continue;
        }
        stun.remaining -= dt;
        if stun.remaining <= 0.0 {
            stun.remaining = 0.0;
            brain.set_movement_enabled(true);
        }
    }
}

pub(crate) fn fire_emitters(
    mut commands: Commands,
    mut cues: MessageWriter<AnimationCue>,
    mut damage: DamageTargets,
    positions: Query<&Transform>,
    mut firers: Query<
        (
            Entity,
            &Transform,
            &Collider,
            &Facing,
            &Team,
            &mut Emitter,
            &mut FireIntent,
            Option<&mut LinearVelocity>,
        ),
        Without<Dead>,
    >,
) {
    for (entity, transform, collider, facing, team, mut emitter, mut intent, mut velocity) in
        &mut firers
    {
        if !emitter.enabled {
            intent.clear_triggers();
            continue;
        }

        let position = transform.translation.truncate();
        let half_width = collider
            .shape_scaled()
            .as_cuboid()
            .map_or(0.0, |c| c.half_extents.x);

        for kind in [AttackSlotKind::Primary, AttackSlotKind::Secondary] {
            if !intent.wants(kind) {
                continue;
            }
            let Some(slot) = emitter.slot_mut(kind) else {
                continue;
            };
            if !slot.ready() {
                continue;
            }

            // A contact swing with nothing in reach leaves the slot ready.
            let contact_target = match &slot.def.delivery {
                DeliveryDef::Projectile(_) => None,
                DeliveryDef::Contact { reach, .. } => {
                    let Some(target) = intent.target else {
                        continue;
                    };
                    let Ok(target_transform) = positions.get(target) else {
                        continue;
                    };
                    let target_position = target_transform.translation.truncate();
                    if (target_position - position).length() > *reach {
                        continue;
                    }
                    Some((target, target_position))
                }
            };

            if !slot.trigger() {
                continue;
            }
            let attack = slot.def.clone();

            match (&attack.delivery, contact_target) {
                (DeliveryDef::Projectile(def), _) => {
                    let origin = spawn_origin(
                        position,
                        attack.muzzle_offset,
                        *facing,
                        half_width,
                        attack.spawn_margin,
                    );
                    let direction = match intent.aim_at {
                        Some(point) => point - origin,
                        None => Vec2::X * facing.sign(),
                    };
                    spawn_projectile(&mut commands, entity, *team, origin, direction, def);
                    debug!("{:?} fired {:?} projectile from {:?}", entity, kind, origin);
                }
                (DeliveryDef::Contact { damage: amount, .. }, Some((target, target_position))) => {
                    let offset = target_position - position;
                    let hit = Hit {
                        amount: *amount,
                        point: target_position,
                        normal: offset.normalize_or(Vec2::X * facing.sign()),
                    };
                    let outcome = damage.apply(target, entity, hit);
                    debug!("{:?} contact attack on {:?}: {:?}", entity, target, outcome);
                }
                (DeliveryDef::Contact { .. }, None) => continue,
            }

            if attack.recoil != 0.0
                && let Some(velocity) = velocity.as_mut()
            {
                velocity.x -= facing.sign() * attack.recoil;
            }

            let cue = match kind {
                AttackSlotKind::Primary => CueKind::Attack,
                AttackSlotKind::Secondary => CueKind::SecondaryAttack,
            };
            cues.write(AnimationCue { entity, cue });
        }

        intent.clear_triggers();
    }
}

pub(crate) fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Projectile)>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile) in &mut query {
        if projectile.spent {
            continue;
        }
        if projectile.advance(dt) == Flight::Expired {
            projectile.spent = true;
            commands.entity(entity).despawn();
        }
    }
}

/// Resolves projectile contacts against the hit filter. The firer is never
/// hit by its own projectile.
pub(crate) fn resolve_projectile_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut projectiles: Query<(&mut Projectile, &Transform)>,
    layers: Query<&CollisionLayers>,
    mut damage: DamageTargets,
) {
    for ev in started.read() {
        let pairs = [
            (ev.collider1, ev.collider2, ev.body2),
            (ev.collider2, ev.collider1, ev.body1),
        ];

        for (projectile_entity, other_collider, other_body) in pairs {
            let Ok((mut projectile, transform)) = projectiles.get_mut(projectile_entity) else {
                continue;
            };
            if projectile.spent {
                continue;
            }

            let other = other_body.unwrap_or(other_collider);
            if other == projectile.owner || other_collider == projectile.owner {
                continue;
            }

            let memberships = layers
                .get(other_collider)
                .map_or(LayerMask::DEFAULT, |l| l.memberships);
            if !projectile.filter.accepts(memberships) {
                continue;
            }

            let hit = Hit {
                amount: projectile.damage,
                point: transform.translation.truncate(),
                normal: projectile.direction,
            };
            let outcome = damage.apply(other, projectile.owner, hit);

            if projectile.despawns_after(outcome) {
                projectile.spent = true;
                commands.entity(projectile_entity).despawn();
            }
        }
    }
}

pub(crate) fn react_to_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut cues: MessageWriter<AnimationCue>,
    mut query: Query<(
        &DamageResponse,
        Option<&mut LinearVelocity>,
        Option<&mut HitStun>,
        Option<&mut EnemyBrain>,
    )>,
) {
    for event in damage_events.read() {
        if event.lethal {
            continue;
        }
        cues.write(AnimationCue {
            entity: event.target,
            cue: CueKind::Hurt,
        });

        let Ok((response, velocity, stun, brain)) = query.get_mut(event.target) else {
            continue;
        };

        if response.knockback_force > 0.0
            && let Some(mut velocity) = velocity
        {
            velocity.0 += event.normal * response.knockback_force;
            velocity.0 = velocity.0.clamp_length_max(MAX_KNOCKBACK_SPEED);
            debug!(
                "Knockback applied: target={:?} final_velocity=({:.1}, {:.1})",
                event.target, velocity.x, velocity.y
            );
        }

        if response.hit_stun > 0.0
            && let (Some(mut stun), Some(mut brain)) = (stun, brain)
        {
            stun.remaining = response.hit_stun;
            brain.set_movement_enabled(false);
        }
    }
}

/// Makes dead entities inert and starts their cleanup countdown.
pub(crate) fn begin_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut cues: MessageWriter<AnimationCue>,
    mut query: Query<(
        Option<&DamageResponse>,
        Option<&mut LinearVelocity>,
        Option<&mut EnemyBrain>,
        Option<&mut Emitter>,
        Has<Player>,
    )>,
) {
    for event in death_events.read() {
        let Ok((response, velocity, brain, emitter, is_player)) = query.get_mut(event.entity)
        else {
            continue;
        };

        if let Some(mut velocity) = velocity {
            velocity.0 = Vec2::ZERO;
        }
        if let Some(mut brain) = brain {
            brain.enabled = false;
        }
        if let Some(mut emitter) = emitter {
            emitter.enabled = false;
        }

        cues.write(AnimationCue {
            entity: event.entity,
            cue: CueKind::Death,
        });

        if is_player {
            info!("Player died (killed by {:?})", event.killer);
        } else {
            info!("Enemy {:?} died", event.entity);
        }

        let delay = response.map_or(0.0, |r| r.death_cleanup_delay);
        if delay <= 0.0 {
            commands.entity(event.entity).despawn();
        } else {
            commands.entity(event.entity).insert((
                Dead,
                DeathCleanup { remaining: delay },
                RigidBodyDisabled,
                ColliderDisabled,
            ));
        }
    }
}

pub(crate) fn tick_death_cleanup(
    mut commands: Commands,
    time: Res<Time>,
    mut finished: MessageReader<DeathAnimationFinished>,
    mut query: Query<(Entity, &mut DeathCleanup)>,
) {
    for event in finished.read() {
        if let Ok((_, mut cleanup)) = query.get_mut(event.entity) {
            cleanup.remaining = 0.0;
        }
    }

    let dt = time.delta_secs();
    for (entity, mut cleanup) in &mut query {
        cleanup.remaining -= dt;
        if cleanup.remaining <= 0.0 {
            debug!("Removing dead entity {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}
