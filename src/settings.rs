//! Presentation preferences
//!
//! Persisted in LocalStorage on the web. None of these touch the simulation.

use serde::{Deserialize, Serialize};

/// Player-facing display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Score/lives overlay
    pub show_hud: bool,
    /// Draw explosion rings
    pub explosions: bool,
    /// Red screen flash when the fighter is hit
    pub hit_flash: bool,
    /// Reduced motion (suppresses flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hud: true,
            explosions: true,
            hit_flash: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        self.hit_flash && !self.reduced_motion
    }

    /// Flip the preference bound to a keyboard shortcut.
    /// Returns false for keys with no binding.
    pub fn toggle_for_key(&mut self, key: &str) -> bool {
        let flag = match key {
            "h" | "H" => &mut self.show_hud,
            "x" | "X" => &mut self.explosions,
            "f" | "F" => &mut self.hit_flash,
            "m" | "M" => &mut self.reduced_motion,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "idle_shooter_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Stored settings unreadable ({err}), using defaults"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
