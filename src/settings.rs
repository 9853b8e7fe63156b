//! Player preferences
//!
//! Persisted in LocalStorage on the web. Scores are never stored.

use serde::{Deserialize, Serialize};

/// Ball speed tier chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedTier {
    #[default]
    Slow,
    Medium,
    Fast,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 3] = [SpeedTier::Slow, SpeedTier::Medium, SpeedTier::Fast];

    /// Multiplier applied to the serve speed
    pub fn multiplier(&self) -> f32 {
        match self {
            SpeedTier::Slow => 1.0,
            SpeedTier::Medium => 1.5,
            SpeedTier::Fast => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "Slow",
            SpeedTier::Medium => "Medium",
            SpeedTier::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedTier::Slow),
            "medium" | "med" => Some(SpeedTier::Medium),
            "fast" => Some(SpeedTier::Fast),
            _ => None,
        }
    }

    /// Look up the tier for an exact multiplier (1, 1.5 or 2)
    pub fn from_multiplier(multiplier: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.multiplier() == multiplier)
    }

    /// DOM id of the button selecting this tier
    pub fn button_id(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "slowSpeed",
            SpeedTier::Medium => "mediumSpeed",
            SpeedTier::Fast => "fastSpeed",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Last selected ball speed tier
    pub speed_tier: SpeedTier,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    log::info!("Loaded settings (speed {})", settings.speed_tier.as_str());
                    return settings;
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
