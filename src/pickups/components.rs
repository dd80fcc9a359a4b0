//! Pickups domain: capability flags and collectible items.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::DropDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PickupKind {
    /// Unlocks the elevated jump.
    ElevatedJump,
    /// Unlocks the secondary attack.
    SecondaryAttack,
}

/// Optional moves the player has unlocked. Flags only ever turn on.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityFlags {
    pub elevated_jump: bool,
    pub secondary_attack: bool,
}

impl CapabilityFlags {
    pub fn has(&self, kind: PickupKind) -> bool {
        match kind {
            PickupKind::ElevatedJump => self.elevated_jump,
            PickupKind::SecondaryAttack => self.secondary_attack,
        }
    }

    /// Sets the flag for `kind`; returns whether it was newly granted.
    pub fn grant(&mut self, kind: PickupKind) -> bool {
        let flag = match kind {
            PickupKind::ElevatedJump => &mut self.elevated_jump,
            PickupKind::SecondaryAttack => &mut self.secondary_attack,
        };
        let newly = !*flag;
        *flag = true;
        newly
    }
}

#[derive(Component, Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub consumed: bool,
    pub requires_landing: bool,
    pub landed: bool,
}

impl Pickup {
    /// A pickup placed in the level, collectible at once.
    pub fn placed(kind: PickupKind) -> Self {
        Self {
            kind,
            consumed: false,
            requires_landing: false,
            landed: false,
        }
    }

    /// A pickup dropped by an enemy; collectible once it touches ground.
    pub fn dropped(kind: PickupKind) -> Self {
        Self {
            requires_landing: true,
            ..Self::placed(kind)
        }
    }

    pub fn collectible(&self) -> bool {
        !self.consumed && (!self.requires_landing || self.landed)
    }

    /// Consumes the pickup into `flags`. Returns `None` when it could not be
    /// collected, otherwise whether the capability was newly granted.
    pub fn collect(&mut self, flags: &mut CapabilityFlags) -> Option<bool> {
        if !self.collectible() {
            return None;
        }
        self.consumed = true;
        Some(flags.grant(self.kind))
    }
}

/// Marker on the sensor child of a dropped pickup body.
#[derive(Component, Debug)]
pub struct PickupSensor;

/// Pickup spawned where this entity dies.
#[derive(Component, Debug, Clone)]
pub struct DropsPickup(pub DropDef);
