//! Core domain: boot flow and shared setup systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::resources::GameplayPaused;
use crate::core::state::GameState;

/// Leave `Boot` once content loading (a `Startup` system) has run.
pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    info!("Boot complete, entering run");
    game_state.set(GameState::Run);
}

pub(crate) fn toggle_pause(keyboard: Res<ButtonInput<KeyCode>>, mut paused: ResMut<GameplayPaused>) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        paused.toggle("player");
        info!("Simulation paused: {}", paused.is_paused());
    }
}

/// Holds the physics clock while gameplay is paused so bodies and
/// projectiles stop with the rest of the step.
pub(crate) fn sync_physics_pause(
    paused: Res<GameplayPaused>,
    physics_time: Option<ResMut<Time<Physics>>>,
) {
    let Some(mut physics_time) = physics_time else {
        return;
    };
    if paused.is_paused() == physics_time.is_paused() {
        return;
    }
    if paused.is_paused() {
        physics_time.pause();
    } else {
        physics_time.unpause();
    }
    debug!("Physics clock paused: {}", physics_time.is_paused());
}

pub fn setup_camera(mut commands: Commands) {
    // World units are meters; 48 px per meter on screen.
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / 48.0,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 3.0, 0.0),
    ));
}
