//! Crate error type
//!
//! Gameplay losses are not errors. Everything here is a configuration or
//! programming mistake that should stop the game loudly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// No creature pool is unlocked at this level
    #[error("no creature pool is unlocked at level {level}")]
    EmptyPool { level: u32 },

    /// The active pool only contains the target, so distractors can't be drawn
    #[error("level {level} needs distractors but the pool only holds '{target}'")]
    NoDistractors { level: u32, target: String },

    /// Tuning values that can never produce a playable round
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Tuning JSON could not be parsed
    #[error("could not parse tuning: {0}")]
    Config(#[from] serde_json::Error),
}
