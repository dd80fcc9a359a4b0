//! Animation parameters and one-shot cues.
//!
//! Simulation writes cues and continuous parameters; this layer only reads
//! them. An entity lists the cues it has clips for in [`CueClips`]; a cue
//! without a clip is skipped with a single warning per entity and cue.

use bevy::color::Alpha;
use bevy::ecs::message::Message;
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use avian2d::prelude::LinearVelocity;

use crate::combat::{DeathAnimationFinished, Projectile};
use crate::movement::{Facing, GroundSensor, LocomotionPhase, LocomotionState};

/// Continuous animation inputs, refreshed every frame.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub speed: f32,
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub climbing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    Jump,
    ElevatedJump,
    Attack,
    SecondaryAttack,
    Hurt,
    Death,
}

impl CueKind {
    pub const ALL: [CueKind; 6] = [
        CueKind::Jump,
        CueKind::ElevatedJump,
        CueKind::Attack,
        CueKind::SecondaryAttack,
        CueKind::Hurt,
        CueKind::Death,
    ];

    /// Default clip length in seconds.
    pub fn default_duration(self) -> f32 {
        match self {
            CueKind::Jump | CueKind::ElevatedJump => 0.25,
            CueKind::Attack | CueKind::SecondaryAttack => 0.15,
            CueKind::Hurt => 0.2,
            CueKind::Death => 0.6,
        }
    }
}

/// One-shot animation trigger.
#[derive(Debug, Clone, Copy)]
pub struct AnimationCue {
    pub entity: Entity,
    pub cue: CueKind,
}

impl Message for AnimationCue {}

/// Clips available to an entity, with their lengths.
#[derive(Component, Debug, Clone)]
pub struct CueClips {
    pub clips: HashMap<CueKind, f32>,
}

impl CueClips {
    pub fn all() -> Self {
        Self::only(CueKind::ALL)
    }

    pub fn only(kinds: impl IntoIterator<Item = CueKind>) -> Self {
        Self {
            clips: kinds
                .into_iter()
                .map(|kind| (kind, kind.default_duration()))
                .collect(),
        }
    }

    pub fn duration(&self, kind: CueKind) -> Option<f32> {
        self.clips.get(&kind).copied()
    }
}

/// Clip currently playing on an entity.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct CuePlayback {
    pub current: Option<CueKind>,
    pub elapsed: f32,
    pub duration: f32,
}

impl CuePlayback {
    pub fn start(&mut self, cue: CueKind, duration: f32) {
        self.current = Some(cue);
        self.elapsed = 0.0;
        self.duration = duration;
    }

    /// Advances the clip; returns the cue that just finished, if any.
    pub fn advance(&mut self, dt: f32) -> Option<CueKind> {
        let cue = self.current?;
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.current = None;
            Some(cue)
        } else {
            None
        }
    }

    /// Playback position in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

pub(crate) fn write_animation_params(
    mut query: Query<(
        &mut AnimationParams,
        &LinearVelocity,
        Option<&GroundSensor>,
        Option<&LocomotionState>,
    )>,
) {
    for (mut params, velocity, ground, locomotion) in &mut query {
        *params = AnimationParams {
            speed: velocity.x.abs(),
            grounded: ground.is_some_and(|g| g.grounded),
            vertical_velocity: velocity.y,
            climbing: locomotion.is_some_and(|l| l.phase == LocomotionPhase::Climbing),
        };
    }
}

pub(crate) fn play_cues(
    mut cues: MessageReader<AnimationCue>,
    mut warned: Local<HashSet<(Entity, CueKind)>>,
    mut removed: RemovedComponents<CueClips>,
    mut query: Query<(&CueClips, &mut CuePlayback)>,
) {
    for entity in removed.read() {
        warned.retain(|(warned_entity, _)| *warned_entity != entity);
    }

    for AnimationCue { entity, cue } in cues.read().copied() {
        let Ok((clips, mut playback)) = query.get_mut(entity) else {
            continue;
        };
        match clips.duration(cue) {
            Some(duration) => playback.start(cue, duration),
            None => {
                if warned.insert((entity, cue)) {
                    warn!("Entity {:?} has no clip for cue {:?}, skipping", entity, cue);
                }
            }
        }
    }
}

pub(crate) fn advance_playback(
    time: Res<Time>,
    mut finished: MessageWriter<DeathAnimationFinished>,
    mut query: Query<(Entity, &mut CuePlayback, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut playback, mut sprite) in &mut query {
        let alpha = match playback.current {
            Some(CueKind::Hurt) => 0.4,
            Some(CueKind::Death) => 1.0 - playback.progress(),
            _ => 1.0,
        };

        if playback.advance(dt) == Some(CueKind::Death) {
            finished.write(DeathAnimationFinished { entity });
            sprite.color = sprite.color.with_alpha(0.0);
            continue;
        }
        sprite.color = sprite.color.with_alpha(alpha);
    }
}

pub(crate) fn sync_facing(mut query: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in &mut query {
        sprite.flip_x = *facing == Facing::Left;
    }
}

/// Projectiles fade as they use up their travel budget.
pub(crate) fn fade_projectiles(mut query: Query<(&Projectile, &mut Sprite)>) {
    for (projectile, mut sprite) in &mut query {
        let alpha = 1.0 - 0.6 * projectile.progress();
        sprite.color = sprite.color.with_alpha(alpha);
    }
}
