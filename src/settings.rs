//! Player preferences
//!
//! Persisted separately from game data in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::content::Locale;
use crate::platform::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacle phrase and title language
    pub locale: Locale,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Outline hitboxes over the sprites (debug)
    pub show_hitboxes: bool,

    // === Accessibility ===
    /// Reduced motion (no rank-up flash, no shake on collision)
    pub reduced_motion: bool,
    /// Pause automatically when the tab is hidden or loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::Zh,
            show_fps: false,
            show_hitboxes: false,
            reduced_motion: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "press_runner_settings";

    /// Rank-up flash (respects reduced_motion)
    pub fn effective_rank_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from LocalStorage (defaults on native or when absent)
    pub fn load() -> Self {
        match storage::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
