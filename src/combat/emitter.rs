//! Combat domain: cooldown-gated attack emitters.

use bevy::prelude::*;

use crate::content::AttackDef;
use crate::movement::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackSlotKind {
    Primary,
    Secondary,
}

/// One attack with its own cooldown.
#[derive(Debug, Clone)]
pub struct AttackSlot {
    pub def: AttackDef,
    pub cooldown: f32,
}

impl AttackSlot {
    pub fn new(def: AttackDef) -> Self {
        Self { def, cooldown: 0.0 }
    }

    pub fn interval(&self) -> f32 {
        1.0 / self.def.fire_rate.max(0.01)
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }

    /// Starts the cooldown and reports whether the slot was ready.
    pub fn trigger(&mut self) -> bool {
        if !self.ready() {
            return false;
        }
        self.cooldown = self.interval();
        true
    }
}

#[derive(Component, Debug, Clone)]
pub struct Emitter {
    pub primary: AttackSlot,
    pub secondary: Option<AttackSlot>,
    pub enabled: bool,
}

impl Emitter {
    pub fn new(primary: AttackDef, secondary: Option<AttackDef>) -> Self {
        Self {
            primary: AttackSlot::new(primary),
            secondary: secondary.map(AttackSlot::new),
            enabled: true,
        }
    }

    pub fn slot_mut(&mut self, kind: AttackSlotKind) -> Option<&mut AttackSlot> {
        match kind {
            AttackSlotKind::Primary => Some(&mut self.primary),
            AttackSlotKind::Secondary => self.secondary.as_mut(),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.primary.tick(dt);
        if let Some(secondary) = &mut self.secondary {
            secondary.tick(dt);
        }
    }
}

/// What the owner wants to fire this step. Cleared after the emitter runs.
#[derive(Component, Debug, Default, Clone)]
pub struct FireIntent {
    pub primary: bool,
    pub secondary: bool,
    /// World point to aim at; facing direction when unset.
    pub aim_at: Option<Vec2>,
    /// Target for contact delivery.
    pub target: Option<Entity>,
}

impl FireIntent {
    pub fn wants(&self, kind: AttackSlotKind) -> bool {
        match kind {
            AttackSlotKind::Primary => self.primary,
            AttackSlotKind::Secondary => self.secondary,
        }
    }

    pub fn clear_triggers(&mut self) {
        self.primary = false;
        self.secondary = false;
    }
}

/// Spawn point just outside the firer's body along its facing.
pub fn spawn_origin(
    position: Vec2,
    muzzle_offset: [f32; 2],
    facing: Facing,
    half_width: f32,
    margin: f32,
) -> Vec2 {
    let sign = facing.sign();
    let muzzle = Vec2::new(muzzle_offset[0] * sign, muzzle_offset[1]);
    position + muzzle + Vec2::X * sign * (half_width + margin)
}
