//! Game settings and preferences
//!
//! Read as JSON from LocalStorage, separately from the high score. The
//! host page owns writing the record; the game only consumes it.

use serde::{Deserialize, Serialize};

/// Input and auto-pause preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key that toggles pause during a run
    pub pause_key: String,
    /// Pause automatically when the tab is hidden
    pub auto_pause_hidden: bool,
    /// Pause automatically when the window loses focus
    pub auto_pause_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pause_key: "Escape".to_string(),
            auto_pause_hidden: true,
            auto_pause_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "meteor-storm-settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(settings) = serde_json::from_str(&json)
        {
            log::info!("Loaded settings from LocalStorage");
            return settings;
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
