//! Combat domain: input state and tuning constants.

use bevy::prelude::*;

/// Upper bound on velocity after a knockback kick.
pub const MAX_KNOCKBACK_SPEED: f32 = 20.0;

/// Player attack buttons. The secondary press edge is latched until a
/// physics step consumes it.
#[derive(Resource, Debug, Default, Clone)]
pub struct CombatInput {
    pub primary_held: bool,
    pub secondary_pressed: bool,
}
