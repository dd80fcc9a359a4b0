//! Combat domain: projectiles with a fixed travel budget.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{DamageOutcome, Team};
use crate::content::ProjectileDef;

/// Which bodies a projectile may hit, as configured in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum HitPolicy {
    /// Only the firer's opponents.
    #[default]
    Opponents,
    /// Anything outside the firer's own category.
    AnyButOwner,
}

/// When a projectile removes itself after a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum HitDespawn {
    /// On every accepted hit, whether or not damage landed.
    #[default]
    OnAnyHit,
    /// Only when damage was confirmed.
    OnDamage,
    /// Passes through everything until its budget runs out.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitFilter {
    Mask(LayerMask),
    AnyExcept(LayerMask),
}

impl HitFilter {
    pub fn for_team(team: Team, policy: HitPolicy) -> Self {
        match policy {
            HitPolicy::Opponents => HitFilter::Mask(team.opponent_layer().into()),
            HitPolicy::AnyButOwner => HitFilter::AnyExcept(team.body_layer().into()),
        }
    }

    pub fn accepts(&self, memberships: LayerMask) -> bool {
        match self {
            HitFilter::Mask(mask) => memberships.0 & mask.0 != 0,
            HitFilter::AnyExcept(excluded) => memberships.0 & excluded.0 == 0,
        }
    }

    /// Collision filter bits for the projectile's own collider.
    pub fn collision_filters(&self) -> LayerMask {
        match self {
            HitFilter::Mask(mask) => *mask,
            HitFilter::AnyExcept(excluded) => LayerMask(!excluded.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    InFlight,
    Expired,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub owner: Entity,
    pub direction: Vec2,
    pub speed: f32,
    pub traveled: f32,
    pub max_distance: f32,
    pub damage: i32,
    pub filter: HitFilter,
    pub despawn: HitDespawn,
    /// Set once the projectile has been consumed by a hit.
    pub spent: bool,
}

impl Projectile {
    pub fn new(owner: Entity, direction: Vec2, def: &ProjectileDef, filter: HitFilter) -> Self {
        Self {
            owner,
            direction: launch_direction(direction),
            speed: def.speed,
            traveled: 0.0,
            max_distance: def.max_distance,
            damage: def.damage,
            filter,
            despawn: def.despawn,
            spent: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    pub fn advance(&mut self, dt: f32) -> Flight {
        self.traveled = (self.traveled + self.speed * dt).min(self.max_distance);
        if self.traveled >= self.max_distance {
            Flight::Expired
        } else {
            Flight::InFlight
        }
    }

    /// Fraction of the travel budget used, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.max_distance <= 0.0 {
            1.0
        } else {
            (self.traveled / self.max_distance).clamp(0.0, 1.0)
        }
    }

    pub fn despawns_after(&self, outcome: DamageOutcome) -> bool {
        match self.despawn {
            HitDespawn::OnAnyHit => true,
            HitDespawn::OnDamage => outcome.is_confirmed(),
            HitDespawn::Never => false,
        }
    }
}

/// Normalized launch direction; zero-length input falls back to +X.
pub fn launch_direction(direction: Vec2) -> Vec2 {
    if direction.length_squared() < 1e-4 {
        warn!("Projectile launched with zero-length direction, defaulting to +X");
        Vec2::X
    } else {
        direction.normalize()
    }
}

pub fn spawn_projectile(
    commands: &mut Commands,
    owner: Entity,
    team: Team,
    origin: Vec2,
    direction: Vec2,
    def: &ProjectileDef,
) -> Entity {
    let filter = HitFilter::for_team(team, def.targets);
    let projectile = Projectile::new(owner, direction, def, filter);
    let velocity = projectile.velocity();
    let color = match team {
        Team::Player => Color::srgb(1.0, 0.9, 0.4),
        Team::Enemy => Color::srgb(1.0, 0.4, 0.3),
    };

    commands
        .spawn((
            projectile,
            Name::new("Projectile"),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(def.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(origin.extend(1.0)),
            RigidBody::Kinematic,
            Collider::circle(def.radius),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(team.projectile_layer(), filter.collision_filters()),
            LinearVelocity(velocity),
        ))
        .id()
}
