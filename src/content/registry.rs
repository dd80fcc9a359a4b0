//! ContentRegistry resource holding every loaded definition.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for loaded content. Enemies are looked up by id.
#[derive(Resource, Debug, Clone)]
pub struct ContentRegistry {
    pub player: PlayerDef,
    pub enemies: HashMap<String, EnemyDef>,
    pub arena: ArenaDef,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        let sentry = EnemyDef::sentry();
        Self {
            player: PlayerDef::default(),
            enemies: HashMap::from([(sentry.id.clone(), sentry)]),
            arena: ArenaDef::default(),
        }
    }
}

impl ContentRegistry {
    pub fn enemy(&self, id: &str) -> Option<&EnemyDef> {
        self.enemies.get(id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Enemies: {}\n\
             - Arena: {} ({} ground slabs, {} ladders, {} pickups, {} enemy placements)",
            self.enemies.len(),
            self.arena.id,
            self.arena.ground.len(),
            self.arena.ladders.len(),
            self.arena.pickups.len(),
            self.arena.enemies.len(),
        )
    }
}
