//! Integration test harness.
//!
//! Apps are headless: `MinimalPlugins` plus states, assets, scenes and the
//! physics solver, with a manual clock so every `update` is one fixed step.

#![allow(dead_code)]

use std::time::Duration;

use ari_sim::SimulationPlugin;
use ari_sim::content::ContentRegistry;
use ari_sim::core::GameState;
use avian2d::prelude::*;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const STEP_HZ: f64 = 60.0;

/// Builds a headless app. With `Some(registry)` that content is used as-is,
/// otherwise the bundled `assets/data` files are loaded.
pub fn app_headless(registry: Option<ContentRegistry>) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        PhysicsPlugins::default(),
    ))
    .insert_resource(Time::<Fixed>::from_hz(STEP_HZ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / STEP_HZ,
    )));

    if let Some(registry) = registry {
        app.insert_resource(registry);
    }

    app.add_plugins(SimulationPlugin);
    // `App::run` normally does this; avian registers its diagnostics here.
    app.finish();
    app.cleanup();
    app
}

/// Flips the pause source used by tests.
pub fn toggle_pause(app: &mut App) {
    app.world_mut()
        .resource_mut::<ari_sim::core::GameplayPaused>()
        .toggle("test");
}

/// Runs updates until the arena exists in `GameState::Run`.
pub fn boot(app: &mut App) {
    for _ in 0..10 {
        app.update();
        let running = app
            .world()
            .get_resource::<State<GameState>>()
            .is_some_and(|state| *state.get() == GameState::Run);
        if running && single::<ari_sim::movement::Player>(app).is_some() {
            return;
        }
    }
    panic!("app did not reach GameState::Run with a spawned player");
}

pub fn step(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

/// The only entity carrying `T`, if there is exactly one.
pub fn single<T: Component>(app: &mut App) -> Option<Entity> {
    let world = app.world_mut();
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<T>>()
        .iter(world)
        .collect();
    match entities.as_slice() {
        [entity] => Some(*entity),
        _ => None,
    }
}

pub fn count<T: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), With<T>>().iter(world).count()
}
