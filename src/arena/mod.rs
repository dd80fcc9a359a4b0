//! Arena domain: builds the level, player and enemies from content.

mod spawn;


use bevy::prelude::*;

use crate::core::GameState;

pub use spawn::{ArenaEntity, spawn_arena};

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Run), spawn::spawn_arena_on_enter);
    }
}
