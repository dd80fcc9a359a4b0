//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementIntent;

/// Runs every frame. Press edges are OR-ed in so a frame without a physics
/// step does not drop them.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MovementIntent>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    intent.horizontal = x;
    intent.vertical = y;
    intent.jump_held = keyboard.pressed(KeyCode::Space);
    intent.run_held = keyboard.pressed(KeyCode::ShiftLeft);
    intent.jump_pressed |= keyboard.just_pressed(KeyCode::Space);
    intent.elevated_jump_pressed |= keyboard.just_pressed(KeyCode::KeyQ);
}
