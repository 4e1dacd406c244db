//! Sprite Seek entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;

    use sprite_seek::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
    use sprite_seek::persistence::LocalStorageStore;
    use sprite_seek::platform::{HighLevelStore, present};
    use sprite_seek::renderer::{ClickQueue, DomHud, SpriteBoard};
    use sprite_seek::sim::Game;
    use sprite_seek::{GameError, Tuning};

    /// Everything the frame loop touches
    struct App {
        game: Game,
        board: SpriteBoard,
        hud: DomHud,
        store: LocalStorageStore,
        clicks: ClickQueue,
        last_time: f64,
    }

    impl App {
        /// Apply queued clicks, then advance one frame
        fn update(&mut self, time: f64) -> Result<(), GameError> {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let (w, h) = self.board.size();
            if w > 0.0 && h > 0.0 {
                self.game.resize(Vec2::new(w, h));
            }

            let clicks: Vec<(u64, usize)> = self.clicks.borrow_mut().drain(..).collect();
            for (round_id, index) in clicks {
                self.game.click(round_id, index)?;
            }

            self.game.tick(dt)
        }

        /// Push drained events to the HUD and storage
        fn present(&mut self) {
            for event in self.game.drain_events() {
                present(&event, &mut self.hud, &mut self.store);
            }
        }

        fn render(&mut self) {
            let Some(round) = self.game.round() else { return };
            let tuning = self.game.tuning();
            if let Err(e) = self.board.sync(round, &tuning.sprites, tuning.entity_size) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// One animation frame. Returns false once the game can't continue.
        fn frame(&mut self, time: f64) -> bool {
            let result = self.update(time);
            self.present();
            match result {
                Ok(()) => {
                    self.render();
                    true
                }
                Err(e) => {
                    log::error!("Game stopped: {}", e);
                    false
                }
            }
        }
    }

    fn js_error(e: GameError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sprite Seek starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let clicks = ClickQueue::default();
        let board = SpriteBoard::new(&document, "game-board", clicks.clone())?;
        let (w, h) = board.size();
        let arena = if w > 0.0 && h > 0.0 {
            Vec2::new(w, h)
        } else {
            Vec2::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
        };

        let store = LocalStorageStore;
        let high_level = store.load_high_level().unwrap_or(1);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, Tuning::load(), high_level, arena).map_err(js_error)?;
        game.start().map_err(js_error)?;
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            board,
            hud: DomHud::new(&document),
            store,
            clicks,
            last_time: 0.0,
        }));
        {
            let mut app = app.borrow_mut();
            app.present();
            app.render();
        }

        request_animation_frame(app);
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_running = app.borrow_mut().frame(time);
        if keep_running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run with a simulated player, for balance checks from a terminal.
///
/// Usage: `sprite-seek [seconds] [seed]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use sprite_seek::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, REFERENCE_FPS};
    use sprite_seek::persistence::MemoryStore;
    use sprite_seek::platform::{HighLevelStore, LogHud, present};
    use sprite_seek::sim::{Game, GameEvent};
    use sprite_seek::Tuning;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(300);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    log::info!("Sprite Seek (native) auto-play: {}s, seed {}", seconds, seed);

    let mut store = MemoryStore::default();
    let mut hud = LogHud;
    let arena = Vec2::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT);

    let mut game = match Game::new(seed, Tuning::default(), store.load_high_level().unwrap_or(1), arena)
    {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };

    // Simulated player: takes longer to scan a busier board, sometimes misclicks
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let dt = 1.0 / REFERENCE_FPS;
    let mut rounds = 0u32;
    let mut losses = 0u32;
    let mut decide_in = 0.0f32;

    let result = (|| -> Result<(), sprite_seek::GameError> {
        game.start()?;
        for _ in 0..(seconds as f32 * REFERENCE_FPS) as u32 {
            for event in game.drain_events() {
                match &event {
                    GameEvent::RoundStarted { entity_count, .. } => {
                        rounds += 1;
                        decide_in = 0.5 + *entity_count as f32 * player.random_range(0.2..0.6);
                    }
                    GameEvent::RoundLost { .. } => losses += 1,
                    _ => {}
                }
                present(&event, &mut hud, &mut store);
            }

            decide_in -= dt;
            if decide_in <= 0.0 {
                if let Some(round) = game.round() {
                    let index = if player.random_bool(0.92) {
                        round.target_index().unwrap_or(0)
                    } else {
                        player.random_range(0..round.entities.len())
                    };
                    let id = round.id;
                    game.click(id, index)?;
                }
            }

            game.tick(dt)?;
        }
        Ok(())
    })();

    if let Err(e) = result {
        log::error!("Game stopped: {}", e);
        std::process::exit(1);
    }

    let session = game.session();
    println!(
        "Played {} rounds ({} lost). Final level {}, score {}, best level {}",
        rounds,
        losses,
        session.level,
        session.score,
        store.load_high_level().unwrap_or(session.high_level)
    );
}
