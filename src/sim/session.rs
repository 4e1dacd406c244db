//! Score and level progression
//!
//! `Session::apply` is the only way counters change.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What ended (or tried to end) the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundInput {
    TargetClicked,
    DistractorClicked,
    TimerExpired,
}

impl RoundInput {
    pub fn is_win(&self) -> bool {
        matches!(self, RoundInput::TargetClicked)
    }
}

/// Progress carried across rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub level: u32,
    /// Highest level ever reached, persisted between visits
    pub high_level: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Session {
    /// Fresh run remembering a previous best
    pub fn new(high_level: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            high_level: high_level.max(1),
        }
    }

    /// Start a run partway through, e.g. for testing a late level
    pub fn at_level(level: u32, score: u64, high_level: u32) -> Self {
        let level = level.max(1);
        Self {
            score,
            level,
            high_level: high_level.max(level),
        }
    }

    /// Next session after `input`
    pub fn apply(&self, input: RoundInput, tuning: &Tuning) -> Session {
        if input.is_win() {
            let level = self.level.saturating_add(1);
            Session {
                score: self.score.saturating_add(tuning.score_award),
                level,
                high_level: self.high_level.max(level),
            }
        } else {
            Session {
                score: 0,
                level: 1,
                high_level: self.high_level,
            }
        }
    }
}
