//! Combat domain: range-gated enemy decisions.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{Dead, Enemy, FireIntent};
use crate::movement::Facing;
use crate::movement::locomotion::move_towards;

/// Detection radii, expected to satisfy `chase <= attack <= sight`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EnemyRanges {
    pub sight: f32,
    pub attack: f32,
    pub chase: f32,
}

impl EnemyRanges {
    pub fn is_ordered(&self) -> bool {
        self.chase >= 0.0 && self.chase <= self.attack && self.attack <= self.sight
    }

    /// Clamps the radii into `0 <= chase <= attack <= sight`, keeping the
    /// attack radius fixed.
    pub fn ordered(self) -> Self {
        let attack = self.attack.max(0.0);
        Self {
            sight: self.sight.max(attack),
            attack,
            chase: self.chase.clamp(0.0, attack),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum DistanceMetric {
    #[default]
    Horizontal,
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(self, delta: Vec2) -> f32 {
        match self {
            DistanceMetric::Horizontal => delta.x.abs(),
            DistanceMetric::Euclidean => delta.length(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyMotion {
    pub walk_speed: f32,
    pub acceleration: f32,
    /// Closest the enemy will walk to its target.
    pub stop_distance: f32,
    pub metric: DistanceMetric,
    pub face_target: bool,
    pub can_move: bool,
}

impl Default for EnemyMotion {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            acceleration: 20.0,
            stop_distance: 1.5,
            metric: DistanceMetric::Horizontal,
            face_target: true,
            can_move: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EnemyMode {
    #[default]
    Idle,
    Chase,
    Attack,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    pub target: Option<Entity>,
    pub ranges: EnemyRanges,
    pub motion: EnemyMotion,
    pub mode: EnemyMode,
    pub enabled: bool,
    movement_enabled: bool,
    /// Set after the first missing-target warning so it is logged once.
    target_warned: bool,
}

impl EnemyBrain {
    pub fn new(ranges: EnemyRanges, motion: EnemyMotion, target: Option<Entity>) -> Self {
        Self {
            target,
            ranges,
            motion,
            mode: EnemyMode::Idle,
            enabled: true,
            movement_enabled: true,
            target_warned: false,
        }
    }

    /// Suspends or restores walking; used by hit-stun.
    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled && self.motion.can_move
    }

    pub fn target_warned(&self) -> bool {
        self.target_warned
    }

    /// Latches the warning flag; true only on the first call since the
    /// target was last valid.
    fn warn_target_once(&mut self) -> bool {
        !std::mem::replace(&mut self.target_warned, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub mode: EnemyMode,
    pub fire: bool,
    pub velocity_x: f32,
    pub facing: Option<Facing>,
}

/// One decision step. Firing and walking are decided independently.
pub fn decide(
    brain: &EnemyBrain,
    position: Vec2,
    target: Option<Vec2>,
    velocity_x: f32,
    dt: f32,
) -> Decision {
    let decelerate = move_towards(velocity_x, 0.0, brain.motion.acceleration * dt);
    let idle = Decision {
        mode: EnemyMode::Idle,
        fire: false,
        velocity_x: decelerate,
        facing: None,
    };

    let Some(target) = target else {
        return idle;
    };

    let delta = target - position;
    let distance = brain.motion.metric.distance(delta);
    if distance > brain.ranges.sight {
        return idle;
    }

    let fire = distance <= brain.ranges.attack;
    let walking = brain.movement_enabled()
        && distance <= brain.ranges.chase
        && distance > brain.motion.stop_distance;

    let velocity_x = if walking {
        let direction = Facing::from_axis(delta.x).map_or(0.0, Facing::sign);
        let target_vx = direction * brain.motion.walk_speed;
        move_towards(velocity_x, target_vx, brain.motion.acceleration * dt)
    } else {
        decelerate
    };

    let facing = if brain.motion.face_target {
        Facing::from_axis(delta.x)
    } else {
        None
    };

    let mode = if fire {
        EnemyMode::Attack
    } else if walking {
        EnemyMode::Chase
    } else {
        EnemyMode::Idle
    };

    Decision {
        mode,
        fire,
        velocity_x,
        facing,
    }
}

pub(crate) fn run_enemy_brains(
    time: Res<Time>,
    targets: Query<(&Transform, Has<Dead>), Without<Enemy>>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &mut EnemyBrain,
            &mut FireIntent,
            &mut LinearVelocity,
            &mut Facing,
        ),
        (With<Enemy>, Without<Dead>),
    >,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut brain, mut intent, mut velocity, mut facing) in &mut enemies {
        if !brain.enabled {
            intent.clear_triggers();
            continue;
        }

        let target_position = match brain.target.map(|target| (target, targets.get(target))) {
            Some((_, Ok((target_transform, false)))) => {
                brain.target_warned = false;
                Some(target_transform.translation.truncate())
            }
            Some((_, Ok((_, true)))) => None,
            Some((target, Err(_))) => {
                if brain.warn_target_once() {
                    warn!("Enemy {:?} lost its target {:?}", entity, target);
                }
                None
            }
            None => {
                if brain.warn_target_once() {
                    warn!("Enemy {:?} has no target assigned", entity);
                }
                None
            }
        };

        let decision = decide(
            &brain,
            transform.translation.truncate(),
            target_position,
            velocity.x,
            dt,
        );

        if decision.mode != brain.mode {
            debug!("Enemy {:?} mode: {:?} -> {:?}", entity, brain.mode, decision.mode);
            brain.mode = decision.mode;
        }

        velocity.x = decision.velocity_x;
        if let Some(new_facing) = decision.facing {
            *facing = new_facing;
        }

        intent.primary = decision.fire;
        intent.aim_at = target_position;
        intent.target = brain.target;
    }
}
