//! High level persistence
//!
//! One number survives between visits: the best level reached. It lives in
//! LocalStorage on the web and in memory everywhere else.

use crate::platform::HighLevelStore;

/// Storage key, shared with earlier builds of the game
pub const STORAGE_KEY: &str = "highLevel";

/// Parse a stored value; anything unreadable counts as absent
pub fn parse_high_level(raw: &str) -> Option<u32> {
    serde_json::from_str::<u32>(raw.trim())
        .ok()
        .filter(|level| *level >= 1)
}

/// Volatile store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl HighLevelStore for MemoryStore {
    fn load_high_level(&self) -> Option<u32> {
        self.value
    }

    fn save_high_level(&mut self, level: u32) {
        self.value = Some(level);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighLevelStore for LocalStorageStore {
    fn load_high_level(&self) -> Option<u32> {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, starting without a best level");
            return None;
        };

        match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => {
                let level = parse_high_level(&raw);
                match level {
                    Some(level) => log::info!("Loaded best level {}", level),
                    None => log::warn!("Ignoring unreadable best level '{}'", raw),
                }
                level
            }
            Ok(None) => {
                log::info!("No best level found, starting fresh");
                None
            }
            Err(e) => {
                log::warn!("Failed to read best level: {:?}", e);
                None
            }
        }
    }

    fn save_high_level(&mut self, level: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best level {} not saved", level);
            return;
        };

        match serde_json::to_string(&level) {
            Ok(json) => match storage.set_item(STORAGE_KEY, &json) {
                Ok(()) => log::info!("Best level saved ({})", level),
                Err(e) => log::warn!("Failed to save best level: {:?}", e),
            },
            Err(e) => log::warn!("Failed to encode best level: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_level() {
        assert_eq!(parse_high_level("12"), Some(12));
        assert_eq!(parse_high_level(" 3\n"), Some(3));
        assert_eq!(parse_high_level("0"), None);
        assert_eq!(parse_high_level("-4"), None);
        assert_eq!(parse_high_level("twelve"), None);
        assert_eq!(parse_high_level(""), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load_high_level(), None);
        store.save_high_level(9);
        assert_eq!(store.load_high_level(), Some(9));
    }
}
