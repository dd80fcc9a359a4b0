//! Movement domain: normalized movement intent sampled from input.

use bevy::prelude::*;

/// Movement intent for the player. Levels are overwritten every frame; press
/// edges are latched until a physics step consumes them.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementIntent {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub run_held: bool,
    pub elevated_jump_pressed: bool,
}

impl MovementIntent {
    pub fn consume_edges(&mut self) {
        self.jump_pressed = false;
        self.elevated_jump_pressed = false;
    }
}
