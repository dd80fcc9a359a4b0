//! Movement domain: the locomotion state machine.
//!
//! [`step`] advances one physics tick. It takes the previous state, the
//! player's intent, the capability flags and a physics sample, and returns
//! the next state plus a velocity command. It has no ECS access, so the
//! systems that call it only gather the sample and apply the command.

use bevy::prelude::*;

use crate::movement::{
    AscentCap, Facing, LocomotionPhase, LocomotionState, LocomotionTuning, MovementIntent,
};
use crate::pickups::{CapabilityFlags, PickupKind};

/// Physics facts gathered for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsSample {
    pub grounded: bool,
    pub in_climb_zone: bool,
    pub velocity: Vec2,
}

/// Which jump fired this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Standard,
    Elevated,
}

/// Output of one locomotion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCommand {
    pub velocity: Vec2,
    pub facing: Option<Facing>,
    pub jump: Option<JumpKind>,
}

pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

pub fn step(
    state: &LocomotionState,
    tuning: &LocomotionTuning,
    intent: &MovementIntent,
    caps: &CapabilityFlags,
    sample: PhysicsSample,
    dt: f32,
) -> (LocomotionState, VelocityCommand) {
    let mut next = *state;
    let mut velocity = sample.velocity;
    let facing = Facing::from_axis(intent.horizontal);

    if sample.grounded {
        next.coyote_timer = tuning.coyote_time;
        next.airborne_elevated_available = true;
    } else {
        next.coyote_timer -= dt;
    }

    if intent.jump_pressed {
        next.jump_buffer_timer = tuning.jump_buffer;
    }
    next.jump_buffer_timer -= dt;

    // The press edge is only honoured once the capability is held.
    if intent.elevated_jump_pressed && caps.has(PickupKind::ElevatedJump) {
        next.elevated_request_timer = tuning.jump_buffer;
    }
    next.elevated_request_timer -= dt;

    update_climbing(&mut next, tuning, intent, sample, &mut velocity);

    if next.phase == LocomotionPhase::Climbing {
        let mut vy = intent.vertical * tuning.climb_speed;
        if vy < 0.0 {
            vy *= 1.0 + tuning.climb_descend_extra;
        }
        let vx = intent.horizontal * tuning.walk_speed * tuning.climb_horizontal_factor;
        let command = VelocityCommand {
            velocity: Vec2::new(vx, vy),
            facing,
            jump: None,
        };
        return (next, command);
    }

    match next.phase {
        LocomotionPhase::Grounded if !sample.grounded => next.phase = LocomotionPhase::Descending,
        LocomotionPhase::Descending if sample.grounded => next.phase = LocomotionPhase::Grounded,
        _ => {}
    }

    let top_speed = if intent.run_held {
        tuning.run_speed
    } else {
        tuning.walk_speed
    };
    let acceleration = if sample.grounded {
        tuning.ground_acceleration
    } else {
        tuning.air_acceleration
    };
    velocity.x = move_towards(velocity.x, intent.horizontal * top_speed, acceleration * dt);

    if let Some(jump) = resolve_jump(&mut next, tuning, caps, sample.grounded) {
        velocity.y = match jump {
            JumpKind::Standard => tuning.jump_impulse,
            JumpKind::Elevated => tuning.elevated_jump_impulse,
        };
        let command = VelocityCommand {
            velocity,
            facing,
            jump: Some(jump),
        };
        return (next, command);
    }

    velocity.y = apply_gravity(&next.phase, tuning, intent.jump_held, velocity.y, dt);
    next.phase = limit_ascent(next.phase, tuning, intent.jump_held, &mut velocity.y, dt);

    let command = VelocityCommand {
        velocity,
        facing,
        jump: None,
    };
    (next, command)
}

fn update_climbing(
    next: &mut LocomotionState,
    tuning: &LocomotionTuning,
    intent: &MovementIntent,
    sample: PhysicsSample,
    velocity: &mut Vec2,
) {
    let wants_climb = intent.vertical.abs() > tuning.climb_dead_zone;

    if next.phase == LocomotionPhase::Climbing {
        if sample.in_climb_zone && wants_climb {
            return;
        }
        next.phase = if sample.grounded {
            LocomotionPhase::Grounded
        } else {
            LocomotionPhase::Descending
        };
        if !sample.in_climb_zone && tuning.climb_exit_boost != 0.0 {
            velocity.x = velocity.x.signum() * tuning.climb_exit_boost;
        }
    } else if sample.in_climb_zone && wants_climb {
        next.phase = LocomotionPhase::Climbing;
    }
}

/// Elevated jump wins over the standard jump when both are eligible.
fn resolve_jump(
    next: &mut LocomotionState,
    tuning: &LocomotionTuning,
    caps: &CapabilityFlags,
    grounded: bool,
) -> Option<JumpKind> {
    if next.elevated_request_timer > 0.0 && caps.has(PickupKind::ElevatedJump) {
        let in_grace = grounded || next.coyote_timer > -tuning.elevated_coyote_grace;
        let airborne = !in_grace
            && tuning.allow_airborne_elevated_jump
            && next.airborne_elevated_available;

        if in_grace || airborne {
            if airborne {
                next.airborne_elevated_available = false;
            }
            next.elevated_request_timer = 0.0;
            next.jump_buffer_timer = 0.0;
            next.coyote_timer = 0.0;
            next.phase = LocomotionPhase::AscendingElevated {
                ascent: AscentCap::start(tuning.limit_ascent),
                no_cut: tuning.elevated_no_cut_time,
            };
            return Some(JumpKind::Elevated);
        }
    }

    if next.jump_buffer_timer > 0.0 && next.coyote_timer > 0.0 {
        next.jump_buffer_timer = 0.0;
        next.coyote_timer = 0.0;
        next.phase = LocomotionPhase::AscendingStandard {
            ascent: AscentCap::start(tuning.limit_ascent),
        };
        return Some(JumpKind::Standard);
    }

    None
}

fn apply_gravity(
    phase: &LocomotionPhase,
    tuning: &LocomotionTuning,
    jump_held: bool,
    mut vy: f32,
    dt: f32,
) -> f32 {
    let no_cut = matches!(phase, LocomotionPhase::AscendingElevated { no_cut, .. } if *no_cut > 0.0);

    if vy < 0.0 {
        vy -= tuning.gravity * (tuning.fall_gravity_multiplier - 1.0) * dt;
    } else if vy > 0.0 && !jump_held && !no_cut {
        vy -= tuning.gravity * (tuning.ascent_cut_gravity_multiplier - 1.0) * dt;
    }

    vy - tuning.gravity * dt
}

fn limit_ascent(
    phase: LocomotionPhase,
    tuning: &LocomotionTuning,
    jump_held: bool,
    vy: &mut f32,
    dt: f32,
) -> LocomotionPhase {
    match phase {
        LocomotionPhase::AscendingStandard { mut ascent } => {
            cut_ascent(&mut ascent, tuning.max_ascent_time, !jump_held, vy, dt);
            if *vy <= 0.0 {
                LocomotionPhase::Descending
            } else {
                LocomotionPhase::AscendingStandard { ascent }
            }
        }
        LocomotionPhase::AscendingElevated { mut ascent, no_cut } => {
            let released = !jump_held && no_cut <= 0.0;
            cut_ascent(&mut ascent, tuning.elevated_max_ascent_time, released, vy, dt);
            if *vy <= 0.0 {
                LocomotionPhase::Descending
            } else {
                LocomotionPhase::AscendingElevated {
                    ascent,
                    no_cut: (no_cut - dt).max(0.0),
                }
            }
        }
        other => other,
    }
}

fn cut_ascent(ascent: &mut AscentCap, limit: f32, released: bool, vy: &mut f32, dt: f32) {
    if !ascent.capped || *vy <= 0.0 {
        return;
    }
    ascent.elapsed += dt;
    if ascent.elapsed >= limit || released {
        *vy = 0.0;
        ascent.capped = false;
    }
}
