//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
    pub point: Vec2,
    pub normal: Vec2,
    pub lethal: bool,
}

impl Message for DamageEvent {}

#[derive(Debug, Clone)]
pub struct DeathEvent {
    pub entity: Entity,
    pub killer: Entity,
}

impl Message for DeathEvent {}

/// Sent by presentation when a death animation completes, ending the
/// cleanup countdown early.
#[derive(Debug, Clone)]
pub struct DeathAnimationFinished {
    pub entity: Entity,
}

impl Message for DeathAnimationFinished {}
