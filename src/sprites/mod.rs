//! Sprites module: the presentation side of the simulation.
//!
//! This module handles:
//! - Continuous animation parameters derived from bodies
//! - One-shot animation cues and clip playback
//! - Sprite flipping from facing and projectile fading

pub mod animation;

use bevy::prelude::*;

use crate::core::GameState;

pub use animation::*;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationCue>().add_systems(
            Update,
            (
                write_animation_params,
                play_cues,
                advance_playback,
                sync_facing,
                fade_projectiles,
            )
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}
