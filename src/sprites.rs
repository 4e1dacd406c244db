//! Creature sprite resolution
//!
//! Maps a creature identity to a fetchable image URL. The renderer falls back
//! to the placeholder when an image fails to load.

use serde::{Deserialize, Serialize};

/// Where sprite images are fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSource {
    /// URL prefix, with or without a trailing slash
    pub base_url: String,
    /// File extension without the dot
    pub extension: String,
    /// Identity of the image shown when a sprite fails to load
    pub placeholder: String,
}

impl Default for SpriteSource {
    fn default() -> Self {
        Self {
            base_url: "https://play.pokemonshowdown.com/sprites/gen5".to_string(),
            extension: "png".to_string(),
            placeholder: "pokeball".to_string(),
        }
    }
}

impl SpriteSource {
    /// Image URL for a creature identity
    pub fn url(&self, identity: &str) -> String {
        format!(
            "{}/{}.{}",
            self.base_url.trim_end_matches('/'),
            identity,
            self.extension
        )
    }

    /// Image URL used when a sprite can't be loaded
    pub fn placeholder_url(&self) -> String {
        self.url(&self.placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let sprites = SpriteSource::default();
        assert_eq!(
            sprites.url("pikachu"),
            "https://play.pokemonshowdown.com/sprites/gen5/pikachu.png"
        );
        assert_eq!(
            sprites.placeholder_url(),
            "https://play.pokemonshowdown.com/sprites/gen5/pokeball.png"
        );
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let sprites = SpriteSource {
            base_url: "/assets/sprites/".to_string(),
            extension: "webp".to_string(),
            placeholder: "missing".to_string(),
        };
        assert_eq!(sprites.url("eevee"), "/assets/sprites/eevee.webp");
    }
}
