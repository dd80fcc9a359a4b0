//! Combat domain: health, damage outcomes and death bookkeeping.

use bevy::prelude::*;
use serde::Serialize;

use crate::content::HealthDef;
use crate::movement::GameLayer;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn body_layer(self) -> GameLayer {
        match self {
            Team::Player => GameLayer::Player,
            Team::Enemy => GameLayer::Enemy,
        }
    }

    pub fn projectile_layer(self) -> GameLayer {
        match self {
            Team::Player => GameLayer::PlayerProjectile,
            Team::Enemy => GameLayer::EnemyProjectile,
        }
    }

    pub fn opponent_layer(self) -> GameLayer {
        match self {
            Team::Player => GameLayer::Enemy,
            Team::Enemy => GameLayer::Player,
        }
    }
}

#[derive(Component, Debug)]
pub struct Enemy;

/// A single damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub amount: i32,
    pub point: Vec2,
    /// Direction the hit pushes the target.
    pub normal: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The entity has no health to damage.
    NoTarget,
    /// Dead or inside the invulnerability window.
    Ignored,
    Hurt { remaining: u32 },
    Killed,
}

impl DamageOutcome {
    pub fn is_confirmed(self) -> bool {
        matches!(self, DamageOutcome::Hurt { .. } | DamageOutcome::Killed)
    }
}

#[derive(Component, Debug, Clone, Serialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    pub invulnerability_window: f32,
    pub invulnerable_timer: f32,
    pub dead: bool,
}

impl Health {
    pub fn new(max: u32, invulnerability_window: f32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            invulnerability_window,
            invulnerable_timer: 0.0,
            dead: false,
        }
    }

    pub fn from_def(def: &HealthDef) -> Self {
        Self::new(def.max_hp, def.invulnerability)
    }

    /// Applies at least one point of damage. The invulnerability window
    /// starts in the same call, so a second hit in the same step is ignored.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.dead || self.is_invulnerable() {
            return DamageOutcome::Ignored;
        }

        let amount = amount.max(1) as u32;
        self.current = self.current.saturating_sub(amount);
        self.invulnerable_timer = self.invulnerability_window;

        if self.current == 0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer = (self.invulnerable_timer - dt).max(0.0);
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }
}

/// How a target reacts to non-lethal hits and to death.
#[derive(Component, Debug, Clone, Copy)]
pub struct DamageResponse {
    pub knockback_force: f32,
    pub hit_stun: f32,
    pub death_cleanup_delay: f32,
}

impl DamageResponse {
    pub fn from_def(def: &HealthDef) -> Self {
        Self {
            knockback_force: def.knockback_force,
            hit_stun: def.hit_stun,
            death_cleanup_delay: def.death_cleanup_delay,
        }
    }
}

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct HitStun {
    pub remaining: f32,
}

/// Terminal marker; every simulation system skips entities carrying it.
#[derive(Component, Debug)]
pub struct Dead;

/// Countdown until a dead entity is removed.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathCleanup {
    pub remaining: f32,
}
