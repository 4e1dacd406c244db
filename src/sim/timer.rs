//! Level countdown
//!
//! Counts whole seconds from accumulated frame time. Expiry is reported once,
//! after which the countdown is stopped until restarted.

use serde::{Deserialize, Serialize};

/// Something the HUD or state machine must react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// A whole second elapsed; seconds left
    Tick(u32),
    /// Reached zero
    Expired,
}

/// Single-shot countdown timer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Option<u32>,
    /// Seconds accumulated toward the next tick
    elapsed: f32,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `secs`, replacing any running countdown
    pub fn start(&mut self, secs: u32) {
        self.remaining = Some(secs);
        self.elapsed = 0.0;
    }

    /// Stop without signalling. No-op when already stopped.
    pub fn cancel(&mut self) {
        self.remaining = None;
        self.elapsed = 0.0;
    }

    /// Whole seconds left, if running
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Advance by `dt` seconds. Returns at most one signal per call; a frame
    /// longer than a second still only moves the countdown by one tick per
    /// elapsed second, carried over to the following calls.
    pub fn advance(&mut self, dt: f32) -> Option<TimerSignal> {
        let remaining = self.remaining?;

        self.elapsed += dt.max(0.0);
        if self.elapsed < 1.0 {
            return None;
        }
        self.elapsed -= 1.0;

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.cancel();
            Some(TimerSignal::Expired)
        } else {
            self.remaining = Some(remaining);
            Some(TimerSignal::Tick(remaining))
        }
    }
}
