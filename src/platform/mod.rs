//! Platform abstraction layer
//!
//! The simulation never touches the page. Front-ends implement these traits
//! and hand every drained `GameEvent` to `present`.

use crate::renderer::target_label;
use crate::sim::GameEvent;

/// On-screen readouts and overlays
pub trait Hud {
    fn set_score(&mut self, score: u64);
    fn set_level(&mut self, level: u32);
    fn set_high_level(&mut self, level: u32);
    /// Creature the player must find
    fn set_target(&mut self, target: &str);
    /// Countdown readout, empty when the round is untimed
    fn set_timer_text(&mut self, text: &str);
    /// Fire-and-forget overlay (milestones and game-over messages)
    fn celebrate(&mut self, message: &str);
    /// Switch the cursed theme
    fn set_cursed(&mut self, _cursed: bool) {}
}

/// Best-effort storage for the best level reached.
///
/// Implementations swallow their own failures: a missing value loads as
/// `None` and a failed write is only logged.
pub trait HighLevelStore {
    fn load_high_level(&self) -> Option<u32>;
    fn save_high_level(&mut self, level: u32);
}

/// Countdown text as shown on the HUD
pub fn timer_text(remaining: Option<u32>) -> String {
    remaining.map(|secs| secs.to_string()).unwrap_or_default()
}

/// Route one game event to the collaborators
pub fn present<H, S>(event: &GameEvent, hud: &mut H, store: &mut S)
where
    H: Hud + ?Sized,
    S: HighLevelStore + ?Sized,
{
    match event {
        GameEvent::RoundStarted { target, .. } => hud.set_target(target),
        GameEvent::SessionChanged(session) => {
            hud.set_score(session.score);
            hud.set_level(session.level);
            hud.set_high_level(session.high_level);
        }
        GameEvent::HighLevelRaised(level) => store.save_high_level(*level),
        GameEvent::Milestone { message, .. } | GameEvent::RoundLost { message, .. } => {
            hud.celebrate(message)
        }
        GameEvent::TimerChanged(remaining) => hud.set_timer_text(&timer_text(*remaining)),
        GameEvent::CursedMode(cursed) => hud.set_cursed(*cursed),
    }
}

/// HUD that writes to the log, for headless runs
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn set_score(&mut self, score: u64) {
        log::debug!("Score: {}", score);
    }

    fn set_level(&mut self, level: u32) {
        log::debug!("Level: {}", level);
    }

    fn set_high_level(&mut self, level: u32) {
        log::debug!("Highest Level: {}", level);
    }

    fn set_target(&mut self, target: &str) {
        log::info!("{}", target_label(target));
    }

    fn set_timer_text(&mut self, text: &str) {
        if !text.is_empty() {
            log::debug!("Timer: {}", text);
        }
    }

    fn celebrate(&mut self, message: &str) {
        log::info!("{}", message);
    }

    fn set_cursed(&mut self, cursed: bool) {
        log::info!("Cursed theme {}", if cursed { "on" } else { "off" });
    }
}
