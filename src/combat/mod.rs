//! Combat domain: damage, projectiles, emitters and enemy decisions.

mod ai;
mod components;
mod damage;
mod emitter;
mod events;
mod projectile;
mod resources;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::{GameState, SimSet};

pub use ai::{
    Decision, DistanceMetric, EnemyBrain, EnemyMode, EnemyMotion, EnemyRanges, decide,
};
pub use components::{
    DamageOutcome, DamageResponse, Dead, DeathCleanup, Enemy, Health, Hit, HitStun, Team,
};
pub use damage::DamageTargets;
pub use emitter::{AttackSlot, AttackSlotKind, Emitter, FireIntent, spawn_origin};
pub use events::{DamageEvent, DeathAnimationFinished, DeathEvent};
pub use projectile::{
    Flight, HitDespawn, HitFilter, HitPolicy, Projectile, launch_direction, spawn_projectile,
};
pub use resources::{CombatInput, MAX_KNOCKBACK_SPEED};
pub use spawn::{EnemyBundle, spawn_enemy};

/// Systems that resolve hits and deaths, for ordering from other domains.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Hits,
    Reactions,
    Deaths,
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatInput>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<DeathAnimationFinished>()
            .configure_sets(
                FixedPostUpdate,
                (CombatSet::Hits, CombatSet::Reactions, CombatSet::Deaths)
                    .chain()
                    .in_set(SimSet::Resolve),
            )
            .add_systems(
                Update,
                systems::read_combat_input
                    .run_if(in_state(GameState::Run))
                    .run_if(resource_exists::<ButtonInput<KeyCode>>),
            )
            .add_systems(FixedUpdate, systems::tick_combat_timers.in_set(SimSet::Sense))
            .add_systems(
                FixedUpdate,
                (systems::apply_player_fire_intent, ai::run_enemy_brains).in_set(SimSet::Decide),
            )
            .add_systems(
                FixedUpdate,
                (systems::fire_emitters, systems::advance_projectiles)
                    .chain()
                    .in_set(SimSet::Act),
            )
            .add_systems(
                FixedPostUpdate,
                (
                    systems::resolve_projectile_hits.in_set(CombatSet::Hits),
                    systems::react_to_damage.in_set(CombatSet::Reactions),
                    systems::begin_deaths.in_set(CombatSet::Deaths),
                ),
            )
            .add_systems(
                FixedPostUpdate,
                systems::tick_death_cleanup.in_set(SimSet::Cleanup),
            );
    }
}
