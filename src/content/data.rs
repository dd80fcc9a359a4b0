//! Content definitions deserialized from `assets/data/*.ron`.

use serde::{Deserialize, Serialize};

use crate::combat::{DistanceMetric, EnemyMotion, EnemyRanges, HitDespawn, HitPolicy};
use crate::movement::LocomotionTuning;
use crate::pickups::PickupKind;

/// Wrapper for list-style data files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub items: Vec<T>,
}

/// Axis-aligned body size in world units.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct BodyDef {
    pub width: f32,
    pub height: f32,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            width: 0.6,
            height: 1.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthDef {
    pub max_hp: u32,
    pub invulnerability: f32,
    /// Speed of the knockback kick along the hit normal. Zero disables it.
    pub knockback_force: f32,
    /// Seconds of suspended movement after a non-lethal hit.
    pub hit_stun: f32,
    /// Seconds between death and removal. Zero removes immediately.
    pub death_cleanup_delay: f32,
}

impl Default for HealthDef {
    fn default() -> Self {
        Self {
            max_hp: 3,
            invulnerability: 0.2,
            knockback_force: 0.0,
            hit_stun: 0.0,
            death_cleanup_delay: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectileDef {
    pub speed: f32,
    pub max_distance: f32,
    pub damage: i32,
    pub radius: f32,
    pub despawn: HitDespawn,
    pub targets: HitPolicy,
}

impl Default for ProjectileDef {
    fn default() -> Self {
        Self {
            speed: 18.0,
            max_distance: 8.0,
            damage: 1,
            radius: 0.12,
            despawn: HitDespawn::OnAnyHit,
            targets: HitPolicy::Opponents,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum DeliveryDef {
    Projectile(ProjectileDef),
    /// Direct damage to the tracked target when it is within `reach`.
    Contact { reach: f32, damage: i32 },
}

impl Default for DeliveryDef {
    fn default() -> Self {
        DeliveryDef::Projectile(ProjectileDef::default())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AttackDef {
    /// Shots per second.
    pub fire_rate: f32,
    /// Gap between the body edge and a freshly spawned projectile.
    pub spawn_margin: f32,
    /// Muzzle offset for a right-facing firer; mirrored when facing left.
    pub muzzle_offset: [f32; 2],
    /// Backwards velocity kick applied to the firer.
    pub recoil: f32,
    pub delivery: DeliveryDef,
}

impl Default for AttackDef {
    fn default() -> Self {
        Self {
            fire_rate: 6.0,
            spawn_margin: 0.08,
            muzzle_offset: [0.0, 0.1],
            recoil: 0.0,
            delivery: DeliveryDef::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerDef {
    pub body: BodyDef,
    pub color: [f32; 3],
    pub locomotion: LocomotionTuning,
    pub health: HealthDef,
    pub primary: AttackDef,
    pub secondary: AttackDef,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            body: BodyDef::default(),
            color: [0.9, 0.9, 0.95],
            locomotion: LocomotionTuning::default(),
            health: HealthDef::default(),
            primary: AttackDef::default(),
            secondary: AttackDef {
                fire_rate: 2.5,
                delivery: DeliveryDef::Projectile(ProjectileDef {
                    speed: 20.0,
                    damage: 2,
                    radius: 0.2,
                    ..ProjectileDef::default()
                }),
                ..AttackDef::default()
            },
        }
    }
}

/// Item dropped when an enemy dies.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DropDef {
    pub kind: PickupKind,
    /// Lateral launch speed is drawn from `-scatter..=scatter`.
    pub scatter: f32,
    pub pop_speed: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub body: BodyDef,
    #[serde(default = "default_enemy_color")]
    pub color: [f32; 3],
    pub ranges: EnemyRanges,
    #[serde(default)]
    pub motion: EnemyMotion,
    #[serde(default)]
    pub health: HealthDef,
    #[serde(default)]
    pub attack: AttackDef,
    #[serde(default)]
    pub drop: Option<DropDef>,
}

fn default_enemy_color() -> [f32; 3] {
    [0.85, 0.3, 0.3]
}

impl EnemyDef {
    /// Built-in ranged sentry used when no enemy data is available.
    pub fn sentry() -> Self {
        Self {
            id: "sentry".to_string(),
            name: "Sentry".to_string(),
            body: BodyDef {
                width: 0.7,
                height: 1.0,
            },
            color: default_enemy_color(),
            ranges: EnemyRanges {
                sight: 10.0,
                attack: 8.0,
                chase: 4.0,
            },
            motion: EnemyMotion {
                walk_speed: 2.0,
                acceleration: 20.0,
                stop_distance: 1.5,
                metric: DistanceMetric::Horizontal,
                face_target: true,
                can_move: true,
            },
            health: HealthDef {
                max_hp: 3,
                invulnerability: 0.2,
                knockback_force: 3.0,
                hit_stun: 0.25,
                death_cleanup_delay: 1.0,
            },
            attack: AttackDef {
                fire_rate: 1.0 / 1.2,
                recoil: 0.0,
                delivery: DeliveryDef::Projectile(ProjectileDef {
                    speed: 10.0,
                    ..ProjectileDef::default()
                }),
                ..AttackDef::default()
            },
            drop: None,
        }
    }
}

/// Static axis-aligned block: a floor, platform, or ladder zone.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct SlabDef {
    pub center: [f32; 2],
    pub size: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickupPlacementDef {
    pub kind: PickupKind,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyPlacementDef {
    pub enemy_id: String,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArenaDef {
    pub id: String,
    /// Seed for drop scatter and any other simulation randomness.
    #[serde(default)]
    pub seed: u64,
    pub player_spawn: [f32; 2],
    pub ground: Vec<SlabDef>,
    #[serde(default)]
    pub ladders: Vec<SlabDef>,
    #[serde(default)]
    pub pickups: Vec<PickupPlacementDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacementDef>,
}

impl Default for ArenaDef {
    fn default() -> Self {
        Self {
            id: "arena_default".to_string(),
            seed: 0,
            player_spawn: [-6.0, 1.0],
            ground: vec![SlabDef {
                center: [0.0, -1.0],
                size: [40.0, 1.0],
            }],
            ladders: Vec::new(),
            pickups: Vec::new(),
            enemies: vec![EnemyPlacementDef {
                enemy_id: "sentry".to_string(),
                position: [6.0, 1.0],
            }],
        }
    }
}
