//! Content domain: RON-backed definitions, loading and validation.

mod data;
mod loader;
mod registry;
mod validation;


use bevy::prelude::*;
use std::path::PathBuf;

use crate::core::SimRng;

pub use data::*;
pub use loader::{ContentLoadError, load_all_content, parse_ron};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content};

/// Directory holding `player.ron`, `enemies.ron` and `arena.ron`.
#[derive(Resource, Debug, Clone)]
pub struct ContentPath(pub PathBuf);

impl Default for ContentPath {
    fn default() -> Self {
        Self(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/data"))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentPath>()
            .add_systems(Startup, load_content);
    }
}

/// Loads content unless a registry was inserted up front, then validates it
/// and seeds the simulation RNG from the arena.
fn load_content(
    mut commands: Commands,
    path: Res<ContentPath>,
    existing: Option<Res<ContentRegistry>>,
    mut rng: ResMut<SimRng>,
) {
    let registry = match existing {
        Some(registry) => registry.clone(),
        None => match load_all_content(&path.0) {
            Ok(registry) => {
                info!("{}", registry.summary());
                registry
            }
            Err(errors) => {
                for error in &errors {
                    error!("{}", error);
                }
                warn!("Falling back to built-in content defaults");
                ContentRegistry::default()
            }
        },
    };

    for issue in validate_content(&registry) {
        warn!("Content validation: {}", issue);
    }

    rng.reseed(registry.arena.seed);
    commands.insert_resource(registry);
}
