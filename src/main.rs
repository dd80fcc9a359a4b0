use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use ari_sim::SimulationPlugin;
use ari_sim::core::setup_camera;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ari".to_string(),
                resolution: WindowResolution::new(1280, 720),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_plugins(SimulationPlugin)
        .add_systems(Startup, setup_camera)
        .run();
}
