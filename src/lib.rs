//! Sprite Seek - find the matching creature before it bounces away
//!
//! Core modules:
//! - `sim`: Deterministic game logic (placement, motion, rounds, session, timer)
//! - `tuning`: Data-driven game balance
//! - `sprites`: Creature identity to image URL mapping
//! - `platform`: Collaborator traits (HUD, storage) and event presentation
//! - `persistence`: Best-effort high level storage
//! - `renderer`: DOM sprite board (wasm32 only)

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod sprites;
pub mod tuning;

pub use error::GameError;
pub use sprites::SpriteSource;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame rate that per-frame speeds in `Tuning` are expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta fed to the simulation (tab switches, hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Rendered sprite size in arena pixels
    pub const ENTITY_SIZE: f32 = 120.0;

    /// Default arena size used before the board has been measured
    pub const DEFAULT_ARENA_WIDTH: f32 = 960.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 640.0;

    /// Overlay messages
    pub const WRONG_PICK_MESSAGE: &str = "💥 Wrong Pokémon! Game Over 💥";
    pub const TIMEOUT_MESSAGE: &str = "⏰ Time's up! Game Over ⏰";
}

/// Celebration text shown when `level` is reached
pub fn milestone_message(level: u32) -> String {
    format!("🎉 Level {}! 🎉", level)
}
