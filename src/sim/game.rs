//! Round/level state machine
//!
//! Owns the session, the live round and its countdown. Front-ends feed it
//! clicks and frame deltas, then drain `GameEvent`s to update the page.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::step;
use super::round::{Round, build_round};
use super::session::{RoundInput, Session};
use super::timer::{Countdown, TimerSignal};
use crate::consts::{MAX_FRAME_DT, TIMEOUT_MESSAGE, WRONG_PICK_MESSAGE};
use crate::error::GameError;
use crate::milestone_message;
use crate::tuning::Tuning;

/// Lifecycle phase. Won/lost rounds roll straight into the next round, so
/// they only surface as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet, or a round failed to build
    Idle,
    /// A round is on the board
    RoundActive,
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    WrongPick,
    TimedOut,
}

impl LossReason {
    pub fn message(&self) -> &'static str {
        match self {
            LossReason::WrongPick => WRONG_PICK_MESSAGE,
            LossReason::TimedOut => TIMEOUT_MESSAGE,
        }
    }
}

/// Notifications for the front-end, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted {
        round_id: u64,
        level: u32,
        target: String,
        entity_count: usize,
        timed: bool,
    },
    /// Score, level or best level changed
    SessionChanged(Session),
    /// A new best level that should be persisted
    HighLevelRaised(u32),
    /// Level reached a celebration multiple
    Milestone { level: u32, message: String },
    RoundLost { reason: LossReason, message: String },
    /// Seconds left on the countdown, None when the round is untimed
    TimerChanged(Option<u32>),
    /// Cursed theme switched on or off
    CursedMode(bool),
}

/// The whole game
#[derive(Debug)]
pub struct Game {
    tuning: Tuning,
    session: Session,
    phase: GamePhase,
    round: Option<Round>,
    timer: Countdown,
    arena: Vec2,
    rng: Pcg32,
    next_round_id: u64,
    cursed: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create an idle game. Fails if `tuning` can't produce playable rounds.
    pub fn new(seed: u64, tuning: Tuning, high_level: u32, arena: Vec2) -> Result<Self, GameError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            session: Session::new(high_level),
            phase: GamePhase::Idle,
            round: None,
            timer: Countdown::new(),
            arena,
            rng: Pcg32::seed_from_u64(seed),
            next_round_id: 1,
            cursed: false,
            events: Vec::new(),
        })
    }

    /// Replace the session before `start` (resume or test at a later level)
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Seconds left on the countdown, if one is running
    pub fn timer_remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Board was resized; motion clamps sprites into the new bounds next tick
    pub fn resize(&mut self, arena: Vec2) {
        self.arena = arena;
    }

    /// Leave `Idle` and put the first round on the board
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Idle {
            log::debug!("start() ignored, round already active");
            return Ok(());
        }
        log::info!(
            "Game starting at level {} (best {})",
            self.session.level,
            self.session.high_level
        );
        self.events.push(GameEvent::SessionChanged(self.session));
        self.begin_round()
    }

    /// Player clicked entity `index` of round `round_id`.
    ///
    /// Clicks for a round that is no longer live are dropped.
    pub fn click(&mut self, round_id: u64, index: usize) -> Result<(), GameError> {
        let input = match &self.round {
            Some(round) if round.id == round_id => match round.entities.get(index) {
                Some(entity) if entity.is_target => RoundInput::TargetClicked,
                Some(_) => RoundInput::DistractorClicked,
                None => {
                    log::debug!("Ignoring click on missing entity {} in round {}", index, round_id);
                    return Ok(());
                }
            },
            _ => {
                log::debug!("Ignoring click for stale round {}", round_id);
                return Ok(());
            }
        };
        self.handle(input)
    }

    /// Apply a round-ending input and start the next round
    pub fn handle(&mut self, input: RoundInput) -> Result<(), GameError> {
        let Some(round) = self.round.as_ref() else {
            log::debug!("Ignoring {:?} with no live round", input);
            return Ok(());
        };
        if input == RoundInput::TimerExpired && round.timer_secs.is_none() {
            log::debug!("Ignoring timer expiry on untimed round {}", round.id);
            return Ok(());
        }

        self.timer.cancel();
        let previous = self.session;
        self.session = previous.apply(input, &self.tuning);

        match input {
            RoundInput::TargetClicked => {
                log::info!(
                    "Target found: level {} -> {}, score {}",
                    previous.level,
                    self.session.level,
                    self.session.score
                );
                if self.tuning.is_milestone(self.session.level) {
                    self.events.push(GameEvent::Milestone {
                        level: self.session.level,
                        message: milestone_message(self.session.level),
                    });
                }
                if self.session.high_level > previous.high_level {
                    self.events
                        .push(GameEvent::HighLevelRaised(self.session.high_level));
                }
            }
            RoundInput::DistractorClicked | RoundInput::TimerExpired => {
                let reason = if input == RoundInput::TimerExpired {
                    LossReason::TimedOut
                } else {
                    LossReason::WrongPick
                };
                log::info!(
                    "Round lost ({:?}) at level {}, score {}",
                    reason,
                    previous.level,
                    previous.score
                );
                self.events.push(GameEvent::RoundLost {
                    reason,
                    message: reason.message().to_string(),
                });
            }
        }

        self.events.push(GameEvent::SessionChanged(self.session));
        self.begin_round()
    }

    /// Advance motion and the countdown by one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Result<(), GameError> {
        if self.phase != GamePhase::RoundActive {
            return Ok(());
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        if let Some(round) = self.round.as_mut() {
            step(
                &mut round.entities,
                self.arena,
                Vec2::splat(self.tuning.entity_size),
                dt,
            );
        }

        match self.timer.advance(dt) {
            Some(TimerSignal::Tick(remaining)) => {
                self.events.push(GameEvent::TimerChanged(Some(remaining)));
            }
            Some(TimerSignal::Expired) => {
                self.events.push(GameEvent::TimerChanged(Some(0)));
                return self.handle(RoundInput::TimerExpired);
            }
            None => {}
        }
        Ok(())
    }

    /// Tear down the current round, then build one for the session's level
    fn begin_round(&mut self) -> Result<(), GameError> {
        self.timer.cancel();
        self.round = None;
        self.phase = GamePhase::Idle;

        let id = self.next_round_id;
        self.next_round_id += 1;
        let round = build_round(id, self.session.level, self.arena, &self.tuning, &mut self.rng)?;

        if round.cursed != self.cursed {
            self.cursed = round.cursed;
            log::info!("Cursed mode {}", if round.cursed { "on" } else { "off" });
            self.events.push(GameEvent::CursedMode(round.cursed));
        }

        if let Some(secs) = round.timer_secs {
            self.timer.start(secs);
        }
        self.events.push(GameEvent::TimerChanged(round.timer_secs));
        self.events.push(GameEvent::RoundStarted {
            round_id: round.id,
            level: round.level,
            target: round.target.clone(),
            entity_count: round.entities.len(),
            timed: round.timer_secs.is_some(),
        });

        self.round = Some(round);
        self.phase = GamePhase::RoundActive;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(1280.0, 720.0);
    const DT: f32 = 1.0 / 60.0;

    fn started(level: u32, score: u64) -> Game {
        let mut game = Game::new(12345, Tuning::default(), 1, ARENA)
            .unwrap()
            .with_session(Session::at_level(level, score, level));
        game.start().unwrap();
        game.drain_events();
        game
    }

    fn target_click(game: &mut Game) {
        let round = game.round().unwrap();
        let (id, index) = (round.id, round.target_index().unwrap());
        game.click(id, index).unwrap();
    }

    fn distractor_click(game: &mut Game) {
        let round = game.round().unwrap();
        let index = round.entities.iter().position(|e| !e.is_target).unwrap();
        let id = round.id;
        game.click(id, index).unwrap();
    }

    #[test]
    fn test_starts_idle() {
        let mut game = Game::new(1, Tuning::default(), 7, ARENA).unwrap();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.round().is_none());

        // Inputs before start are ignored
        game.handle(RoundInput::TargetClicked).unwrap();
        game.tick(DT).unwrap();
        assert_eq!(game.session(), Session::new(7));

        game.start().unwrap();
        assert_eq!(game.phase(), GamePhase::RoundActive);
        let events = game.drain_events();
        assert_eq!(events[0], GameEvent::SessionChanged(Session::new(7)));
        assert!(matches!(
            events.last(),
            Some(GameEvent::RoundStarted { level: 1, entity_count: 4, timed: false, .. })
        ));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            pools: Vec::new(),
            ..Tuning::default()
        };
        assert!(matches!(
            Game::new(1, tuning, 1, ARENA),
            Err(GameError::EmptyPool { level: 1 })
        ));
    }

    #[test]
    fn test_win_advances_and_rebuilds() {
        let mut game = started(5, 20);
        let first_id = game.round().unwrap().id;

        target_click(&mut game);

        assert_eq!(game.session().level, 6);
        assert_eq!(game.session().score, 30);
        let round = game.round().unwrap();
        assert_ne!(round.id, first_id);
        assert_eq!(round.entities.len(), 9);
        assert_eq!(game.timer_remaining(), None);
    }

    #[test]
    fn test_wrong_pick_resets() {
        let mut game = started(8, 70);
        distractor_click(&mut game);

        assert_eq!(game.session().level, 1);
        assert_eq!(game.session().score, 0);
        assert_eq!(game.session().high_level, 8);
        assert_eq!(game.round().unwrap().entities.len(), 4);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::RoundLost {
            reason: LossReason::WrongPick,
            message: WRONG_PICK_MESSAGE.to_string(),
        }));
    }

    #[test]
    fn test_stale_and_missing_clicks_ignored() {
        let mut game = started(3, 0);
        let round_id = game.round().unwrap().id;

        game.click(round_id + 100, 0).unwrap();
        game.click(round_id, 999).unwrap();
        assert_eq!(game.session().level, 3);
        assert_eq!(game.round().unwrap().id, round_id);

        target_click(&mut game);
        // Click aimed at the round that just ended
        game.click(round_id, 0).unwrap();
        assert_eq!(game.session().level, 4);
    }

    #[test]
    fn test_milestone_and_high_level_events() {
        let mut game = started(9, 80);
        target_click(&mut game);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Milestone {
            level: 10,
            message: milestone_message(10),
        }));
        assert!(events.contains(&GameEvent::HighLevelRaised(10)));
        assert!(events.contains(&GameEvent::TimerChanged(Some(10))));
        assert_eq!(game.timer_remaining(), Some(10));
    }

    #[test]
    fn test_timer_counts_down_and_expires() {
        let mut game = started(12, 100);
        assert_eq!(game.timer_remaining(), Some(10));

        let mut ticks = Vec::new();
        for _ in 0..(11 * 60) {
            game.tick(DT).unwrap();
            for event in game.drain_events() {
                if let GameEvent::TimerChanged(Some(secs)) = event {
                    ticks.push(secs);
                }
            }
            if game.session().level == 1 {
                break;
            }
        }

        assert_eq!(ticks, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(game.session().level, 1);
        assert_eq!(game.session().score, 0);
        assert_eq!(game.round().unwrap().entities.len(), 4);
        assert_eq!(game.timer_remaining(), None);
    }

    #[test]
    fn test_win_restarts_timer_fresh() {
        let mut game = started(15, 0);
        // Exact binary fraction so four seconds add up exactly
        for _ in 0..64 {
            game.tick(1.0 / 16.0).unwrap();
        }
        assert_eq!(game.timer_remaining(), Some(6));

        target_click(&mut game);
        assert_eq!(game.timer_remaining(), Some(10));
    }

    #[test]
    fn test_timer_expiry_ignored_on_untimed_round() {
        let mut game = started(4, 30);
        game.handle(RoundInput::TimerExpired).unwrap();
        assert_eq!(game.session().level, 4);
        assert_eq!(game.session().score, 30);
    }

    #[test]
    fn test_cursed_mode_toggles() {
        let mut game = Game::new(3, Tuning::default(), 1, ARENA)
            .unwrap()
            .with_session(Session::at_level(32, 0, 32));
        game.start().unwrap();
        game.drain_events();

        target_click(&mut game);
        assert!(game.drain_events().contains(&GameEvent::CursedMode(true)));
        assert!(game.round().unwrap().cursed);

        distractor_click(&mut game);
        assert!(game.drain_events().contains(&GameEvent::CursedMode(false)));
    }

    #[test]
    fn test_motion_runs_only_for_live_round() {
        let mut game = started(20, 0);
        let before: Vec<Vec2> = game.round().unwrap().entities.iter().map(|e| e.pos).collect();
        for _ in 0..30 {
            game.tick(DT).unwrap();
        }
        let after: Vec<Vec2> = game.round().unwrap().entities.iter().map(|e| e.pos).collect();
        assert_ne!(before, after);

        let size = game.tuning().entity_size;
        for pos in after {
            assert!(pos.x >= 0.0 && pos.x <= ARENA.x - size);
            assert!(pos.y >= 0.0 && pos.y <= ARENA.y - size);
        }
    }
}
