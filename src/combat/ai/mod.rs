//! Combat domain: AI system modules for enemies.

pub(crate) mod enemy;

pub use enemy::{
    Decision, DistanceMetric, EnemyBrain, EnemyMode, EnemyMotion, EnemyRanges, decide,
};
pub(crate) use enemy::run_enemy_brains;
