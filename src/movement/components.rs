//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Climbable trigger zones - never block movement
    Ladder,
    /// Capability pickups
    Pickup,
    /// Projectiles fired by the player
    PlayerProjectile,
    /// Projectiles fired by enemies
    EnemyProjectile,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for climbable trigger zones (ladders)
#[derive(Component, Debug)]
pub struct Climbable;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing implied by a horizontal axis or delta; `None` when it is zero.
    pub fn from_axis(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Facing::Right)
        } else if x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Result of the ground check, written before locomotion runs.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GroundSensor {
    pub grounded: bool,
}

/// Number of climbable zones the character currently overlaps.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ClimbZoneContact {
    pub zones: u32,
}

impl ClimbZoneContact {
    pub fn inside(&self) -> bool {
        self.zones > 0
    }
}

/// Per-character locomotion configuration, set at spawn from content.
#[derive(Component, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocomotionTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    /// Downward acceleration applied by the controller itself.
    pub gravity: f32,
    pub jump_impulse: f32,
    pub coyote_time: f32,
    pub jump_buffer: f32,
    pub fall_gravity_multiplier: f32,
    pub ascent_cut_gravity_multiplier: f32,
    pub limit_ascent: bool,
    pub max_ascent_time: f32,
    pub elevated_jump_impulse: f32,
    /// Accept the elevated jump while the coyote timer is above `-grace`.
    pub elevated_coyote_grace: f32,
    pub elevated_no_cut_time: f32,
    pub elevated_max_ascent_time: f32,
    pub allow_airborne_elevated_jump: bool,
    pub climb_speed: f32,
    pub climb_descend_extra: f32,
    pub climb_horizontal_factor: f32,
    pub climb_exit_boost: f32,
    pub climb_dead_zone: f32,
    /// Vertical offset of the overlap check from the body center.
    pub ground_check_offset: f32,
    pub ground_check_radius: f32,
    pub ground_cast_distance: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            walk_speed: 3.5,
            run_speed: 8.0,
            ground_acceleration: 60.0,
            air_acceleration: 40.0,
            gravity: 9.81,
            jump_impulse: 14.0,
            coyote_time: 0.12,
            jump_buffer: 0.12,
            fall_gravity_multiplier: 2.5,
            ascent_cut_gravity_multiplier: 2.0,
            limit_ascent: true,
            max_ascent_time: 0.12,
            elevated_jump_impulse: 18.0,
            elevated_coyote_grace: 0.10,
            elevated_no_cut_time: 0.15,
            elevated_max_ascent_time: 0.20,
            allow_airborne_elevated_jump: false,
            climb_speed: 3.0,
            climb_descend_extra: 1.0,
            climb_horizontal_factor: 0.2,
            climb_exit_boost: 0.0,
            climb_dead_zone: 0.05,
            ground_check_offset: -0.6,
            ground_check_radius: 0.12,
            ground_cast_distance: 0.05,
        }
    }
}

/// Elapsed ascent time of a jump and whether the cap still applies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AscentCap {
    pub elapsed: f32,
    pub capped: bool,
}

impl AscentCap {
    pub fn start(capped: bool) -> Self {
        Self {
            elapsed: 0.0,
            capped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum LocomotionPhase {
    Grounded,
    AscendingStandard {
        ascent: AscentCap,
    },
    AscendingElevated {
        ascent: AscentCap,
        /// While positive, releasing jump never truncates the ascent.
        no_cut: f32,
    },
    #[default]
    Descending,
    Climbing,
}

/// Player movement state; mutated only by the locomotion step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LocomotionState {
    pub phase: LocomotionPhase,
    /// Seconds left to accept a jump after leaving the ground. Goes negative
    /// while airborne; the elevated jump grace is measured below zero.
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
    pub elevated_request_timer: f32,
    /// Single-use airborne elevated jump, restored on ground contact.
    pub airborne_elevated_available: bool,
}
