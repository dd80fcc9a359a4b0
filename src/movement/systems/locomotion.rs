//! Movement domain: applies the locomotion step to the player body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Dead;
use crate::movement::locomotion::{self, JumpKind, PhysicsSample};
use crate::movement::{
    ClimbZoneContact, Facing, GroundSensor, LocomotionState, LocomotionTuning, MovementIntent,
    Player,
};
use crate::pickups::CapabilityFlags;
use crate::sprites::{AnimationCue, CueKind};

pub(crate) fn apply_locomotion(
    time: Res<Time>,
    mut intent: ResMut<MovementIntent>,
    mut cues: MessageWriter<AnimationCue>,
    mut query: Query<
        (
            Entity,
            &LocomotionTuning,
            &mut LocomotionState,
            &GroundSensor,
            &ClimbZoneContact,
            &CapabilityFlags,
            &mut LinearVelocity,
            &mut Facing,
        ),
        (With<Player>, Without<Dead>),
    >,
) {
    let dt = time.delta_secs();

    for (entity, tuning, mut state, ground, zones, caps, mut velocity, mut facing) in &mut query {
        let sample = PhysicsSample {
            grounded: ground.grounded,
            in_climb_zone: zones.inside(),
            velocity: velocity.0,
        };

        let previous_phase = state.phase;
        let (next, command) = locomotion::step(&state, tuning, &intent, caps, sample, dt);
        *state = next;
        velocity.0 = command.velocity;

        if let Some(new_facing) = command.facing {
            *facing = new_facing;
        }

        if std::mem::discriminant(&previous_phase) != std::mem::discriminant(&next.phase) {
            debug!("Locomotion phase: {:?} -> {:?}", previous_phase, next.phase);
        }

        if let Some(jump) = command.jump {
            let cue = match jump {
                JumpKind::Standard => CueKind::Jump,
                JumpKind::Elevated => CueKind::ElevatedJump,
            };
            cues.write(AnimationCue { entity, cue });
        }
    }

    intent.consume_edges();
}
