//! Data-driven game balance
//!
//! Every threshold that shapes difficulty lives here instead of in the
//! simulation. Defaults reproduce the shipped game; a JSON override can be
//! stored in LocalStorage for playtesting.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::ENTITY_SIZE;
use crate::error::GameError;
use crate::sprites::SpriteSource;

const EASY: &[&str] = &[
    "bulbasaur", "charmander", "squirtle", "pikachu", "eevee", "jigglypuff",
];

const MEDIUM: &[&str] = &["clefairy", "meowth", "psyduck", "snorlax"];

const HARD: &[&str] = &[
    "zubat", "golbat", "oddish", "gloom", "vileplume", "paras", "parasect", "venonat", "venomoth",
    "tentacool", "tentacruel", "geodude", "graveler", "golem", "ponyta", "rapidash", "slowpoke",
    "slowbro", "magnemite", "magneton", "farfetchd", "doduo", "dodrio", "seel", "dewgong",
    "grimer", "muk", "shellder", "cloyster", "gastly", "haunter", "gengar", "onix", "drowzee",
    "hypno", "krabby", "kingler", "voltorb", "electrode", "exeggcute", "exeggutor", "cubone",
    "marowak", "hitmonlee", "hitmonchan", "lickitung", "koffing", "weezing", "rhyhorn", "rhydon",
    "chansey", "tangela", "kangaskhan", "horsea", "seadra", "goldeen", "seaking", "staryu",
    "starmie", "scyther", "jynx", "electabuzz", "magmar", "pinsir", "tauros", "magikarp",
    "gyarados", "lapras", "ditto", "vaporeon", "jolteon", "flareon", "porygon", "omanyte",
    "omastar", "kabuto", "kabutops", "aerodactyl", "dragonair", "dragonite", "mewtwo", "mew",
];

/// A named group of creatures unlocked from a given level onward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreaturePool {
    pub name: String,
    pub unlock_level: u32,
    pub creatures: Vec<String>,
}

impl CreaturePool {
    fn new(name: &str, unlock_level: u32, creatures: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            unlock_level,
            creatures: creatures.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Sprite speed as a function of level, in pixels per reference frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub base: f32,
    /// Fractional speed-up per level above 1
    pub per_level: f32,
    pub max: f32,
}

impl SpeedCurve {
    pub fn factor(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.base * (1.0 + steps * self.per_level)).min(self.max)
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            base: 0.5,
            per_level: 0.05,
            max: 1.5,
        }
    }
}

/// Game balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Creatures ===
    /// Pools merged into the active pool once their unlock level is reached
    pub pools: Vec<CreaturePool>,

    // === Round size ===
    /// Entities shown at level 0 (level is added on top)
    pub base_entities: u32,
    /// Hard cap on entities per round
    pub max_entities: u32,
    /// Sprite box edge length in arena pixels
    pub entity_size: f32,
    /// Rejection samples before accepting an overlapping spawn
    pub placement_attempts: u32,

    // === Scoring ===
    pub score_award: u64,
    /// Celebrate every time the level reaches a multiple of this
    pub celebration_every: u32,

    // === Pressure ===
    /// First level that runs a countdown
    pub timed_level: u32,
    /// Countdown length in seconds
    pub timer_secs: u32,
    pub speed: SpeedCurve,

    // === Presentation ===
    /// Level at which the dark "cursed" theme kicks in (None disables it)
    pub cursed_level: Option<u32>,
    pub sprites: SpriteSource,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            pools: vec![
                CreaturePool::new("easy", 1, EASY),
                CreaturePool::new("medium", 6, MEDIUM),
                CreaturePool::new("hard", 11, HARD),
            ],

            base_entities: 3,
            max_entities: 20,
            entity_size: ENTITY_SIZE,
            placement_attempts: 1000,

            score_award: 10,
            celebration_every: 10,

            timed_level: 10,
            timer_secs: 10,
            speed: SpeedCurve::default(),

            cursed_level: Some(33),
            sprites: SpriteSource::default(),
        }
    }
}

impl Tuning {
    /// Creatures that may appear at `level`, in pool order
    pub fn pool_for_level(&self, level: u32) -> Vec<&str> {
        self.pools
            .iter()
            .filter(|pool| pool.unlock_level <= level)
            .flat_map(|pool| pool.creatures.iter().map(String::as_str))
            .collect()
    }

    /// Number of entities spawned for a round at `level`
    pub fn entity_count(&self, level: u32) -> usize {
        self.base_entities
            .saturating_add(level)
            .min(self.max_entities) as usize
    }

    /// Countdown length for `level`, if the level is timed
    pub fn timer_for_level(&self, level: u32) -> Option<u32> {
        (level >= self.timed_level).then_some(self.timer_secs)
    }

    pub fn is_cursed(&self, level: u32) -> bool {
        self.cursed_level.is_some_and(|cursed| level >= cursed)
    }

    pub fn is_milestone(&self, level: u32) -> bool {
        level % self.celebration_every == 0
    }

    /// Reject configurations that would make a round impossible to build.
    ///
    /// The active pool only grows with level, so checking level 1 and every
    /// unlock level covers all levels.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_entities == 0 {
            return Err(GameError::InvalidTuning("max_entities must be at least 1".into()));
        }
        if self.celebration_every == 0 {
            return Err(GameError::InvalidTuning("celebration_every must be at least 1".into()));
        }
        if self.timer_secs == 0 {
            return Err(GameError::InvalidTuning("timer_secs must be at least 1".into()));
        }
        if self.placement_attempts == 0 {
            return Err(GameError::InvalidTuning("placement_attempts must be at least 1".into()));
        }
        if !(self.entity_size.is_finite() && self.entity_size > 0.0) {
            return Err(GameError::InvalidTuning(format!(
                "entity_size must be positive (got {})",
                self.entity_size
            )));
        }
        let speed = self.speed;
        if [speed.base, speed.per_level, speed.max]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(GameError::InvalidTuning(format!(
                "speed curve must be finite and non-negative ({speed:?})"
            )));
        }

        let levels = std::iter::once(1).chain(
            self.pools
                .iter()
                .map(|pool| pool.unlock_level.max(1)),
        );
        for level in levels {
            let distinct: BTreeSet<&str> = self.pool_for_level(level).into_iter().collect();
            match distinct.len() {
                0 => return Err(GameError::EmptyPool { level }),
                1 if self.entity_count(level) > 1 => {
                    let target = distinct.into_iter().next().unwrap_or_default().to_string();
                    return Err(GameError::NoDistractors { level, target });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// LocalStorage key for a playtest override
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sprite_seek_tuning";

    /// Load tuning from a LocalStorage override (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::error!("Ignoring tuning override: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
