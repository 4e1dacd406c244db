//! Round generation
//!
//! A round is one "find the target" challenge: a target identity, a field of
//! placed and moving entities, and an optional countdown.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::placement::{Rect, place};
use crate::consts::REFERENCE_FPS;
use crate::error::GameError;
use crate::tuning::Tuning;

/// One sprite on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Creature name, key into the sprite source
    pub identity: String,
    pub is_target: bool,
    /// Top-left corner in arena pixels
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
}

/// A live challenge instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Unique per game, increases by one each round
    pub id: u64,
    pub level: u32,
    pub target: String,
    pub entities: Vec<Entity>,
    /// Countdown length when the level is timed
    pub timer_secs: Option<u32>,
    pub cursed: bool,
}

impl Round {
    pub fn target_index(&self) -> Option<usize> {
        self.entities.iter().position(|e| e.is_target)
    }
}

/// Build the round for `level` inside an `arena` sized board.
pub fn build_round<R: Rng + ?Sized>(
    id: u64,
    level: u32,
    arena: Vec2,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<Round, GameError> {
    let pool = tuning.pool_for_level(level);
    let target = *pool.choose(rng).ok_or(GameError::EmptyPool { level })?;

    let count = tuning.entity_count(level);
    let target_index = rng.random_range(0..count.max(1));

    let distractors: Vec<&str> = pool.iter().copied().filter(|c| *c != target).collect();
    if count > 1 && distractors.is_empty() {
        return Err(GameError::NoDistractors {
            level,
            target: target.to_string(),
        });
    }

    let size = Vec2::splat(tuning.entity_size);
    let speed = tuning.speed.factor(level) * REFERENCE_FPS;

    let mut placed: Vec<Rect> = Vec::with_capacity(count);
    let mut entities = Vec::with_capacity(count);

    for i in 0..count {
        let is_target = i == target_index;
        let identity = if is_target {
            target
        } else {
            // Non-empty: checked above whenever count > 1
            *distractors.choose(rng).ok_or(GameError::EmptyPool { level })?
        };

        let pos = place(&placed, size, arena, tuning.placement_attempts, rng).pos();
        placed.push(Rect::new(pos, size));

        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * speed,
            (rng.random::<f32>() - 0.5) * speed,
        );

        entities.push(Entity {
            identity: identity.to_string(),
            is_target,
            pos,
            vel,
        });
    }

    let timer_secs = tuning.timer_for_level(level);
    log::info!(
        "Round {}: level {}, find '{}' among {} ({} pool, timer {:?})",
        id,
        level,
        target,
        count,
        pool.len(),
        timer_secs
    );

    Ok(Round {
        id,
        level,
        target: target.to_string(),
        entities,
        timer_secs,
        cursed: tuning.is_cursed(level),
    })
}
