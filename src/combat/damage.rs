//! Combat domain: the damage entry point shared by every damage source.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::{DamageEvent, DamageOutcome, DeathEvent, Health, Hit};

/// Applies hits to any entity with [`Health`] and reports the result.
#[derive(SystemParam)]
pub struct DamageTargets<'w, 's> {
    health: Query<'w, 's, &'static mut Health>,
    damage_events: MessageWriter<'w, DamageEvent>,
    death_events: MessageWriter<'w, DeathEvent>,
}

impl DamageTargets<'_, '_> {
    pub fn apply(&mut self, target: Entity, source: Entity, hit: Hit) -> DamageOutcome {
        let Ok(mut health) = self.health.get_mut(target) else {
            return DamageOutcome::NoTarget;
        };

        let before = health.current;
        let outcome = health.apply_damage(hit.amount);

        if outcome.is_confirmed() {
            let lethal = outcome == DamageOutcome::Killed;
            self.damage_events.write(DamageEvent {
                source,
                target,
                amount: before - health.current,
                point: hit.point,
                normal: hit.normal,
                lethal,
            });
            if lethal {
                self.death_events.write(DeathEvent {
                    entity: target,
                    killer: source,
                });
            }
            debug!(
                "Damage applied: target={:?} hp={}/{} outcome={:?}",
                target, health.current, health.max, outcome
            );
        }

        outcome
    }
}
