//! Validation for content definitions and their cross-references.

use super::registry::ContentRegistry;
use crate::content::{AttackDef, DeliveryDef, HealthDef};

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for pushing an error when a condition does not hold
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

fn validate_health(
    errors: &mut Vec<ValidationError>,
    source_type: &'static str,
    id: &str,
    health: &HealthDef,
) {
    check!(errors, health.max_hp >= 1, source_type, id, "health.max_hp", "must be at least 1");
    check!(
        errors,
        health.invulnerability >= 0.0,
        source_type,
        id,
        "health.invulnerability",
        "must not be negative (got {})",
        health.invulnerability
    );
    check!(
        errors,
        health.death_cleanup_delay >= 0.0,
        source_type,
        id,
        "health.death_cleanup_delay",
        "must not be negative (got {})",
        health.death_cleanup_delay
    );
}

fn validate_attack(
    errors: &mut Vec<ValidationError>,
    source_type: &'static str,
    id: &str,
    field: &'static str,
    attack: &AttackDef,
) {
    check!(
        errors,
        attack.fire_rate > 0.0,
        source_type,
        id,
        field,
        "fire_rate must be positive (got {})",
        attack.fire_rate
    );
    match &attack.delivery {
        DeliveryDef::Projectile(projectile) => {
            check!(
                errors,
                projectile.speed > 0.0 && projectile.max_distance > 0.0,
                source_type,
                id,
                field,
                "projectile speed and max_distance must be positive"
            );
        }
        DeliveryDef::Contact { reach, .. } => {
            check!(errors, *reach > 0.0, source_type, id, field, "contact reach must be positive");
        }
    }
}

/// Validate value ranges and cross-references in the registry.
/// Returns a list of validation errors, empty if everything is consistent.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let player = &registry.player;
    check!(
        errors,
        player.locomotion.walk_speed > 0.0 && player.locomotion.run_speed > 0.0,
        "Player",
        "player",
        "locomotion",
        "walk_speed and run_speed must be positive"
    );
    check!(
        errors,
        player.locomotion.coyote_time >= 0.0 && player.locomotion.jump_buffer >= 0.0,
        "Player",
        "player",
        "locomotion",
        "coyote_time and jump_buffer must not be negative"
    );
    validate_health(&mut errors, "Player", "player", &player.health);
    validate_attack(&mut errors, "Player", "player", "primary", &player.primary);
    validate_attack(&mut errors, "Player", "player", "secondary", &player.secondary);

    for (id, enemy) in &registry.enemies {
        let ranges = &enemy.ranges;
        check!(
            errors,
            ranges.chase >= 0.0 && ranges.attack >= 0.0 && ranges.sight >= 0.0,
            "Enemy",
            id,
            "ranges",
            "radii must not be negative"
        );
        check!(
            errors,
            ranges.is_ordered(),
            "Enemy",
            id,
            "ranges",
            "expected chase <= attack <= sight (got chase {}, attack {}, sight {})",
            ranges.chase,
            ranges.attack,
            ranges.sight
        );
        check!(
            errors,
            enemy.motion.walk_speed >= 0.0 && enemy.motion.acceleration > 0.0,
            "Enemy",
            id,
            "motion",
            "walk_speed must not be negative and acceleration must be positive"
        );
        validate_health(&mut errors, "Enemy", id, &enemy.health);
        validate_attack(&mut errors, "Enemy", id, "attack", &enemy.attack);
    }

    let arena = &registry.arena;
    for placement in &arena.enemies {
        check!(
            errors,
            registry.enemies.contains_key(&placement.enemy_id),
            "Arena",
            arena.id,
            "enemies.enemy_id",
            "references missing Enemy '{}'",
            placement.enemy_id
        );
    }
    check!(
        errors,
        !arena.ground.is_empty(),
        "Arena",
        arena.id,
        "ground",
        "needs at least one ground slab"
    );

    errors
}
