//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame deltas only
//! - Seeded RNG only
//! - Stable entity order (spawn order)
//! - No rendering or platform dependencies

pub mod game;
pub mod motion;
pub mod placement;
pub mod round;
pub mod session;
pub mod timer;

pub use game::{Game, GameEvent, GamePhase, LossReason};
pub use motion::step;
pub use placement::{Placement, Rect, place};
pub use round::{Entity, Round, build_round};
pub use session::{RoundInput, Session};
pub use timer::{Countdown, TimerSignal};
