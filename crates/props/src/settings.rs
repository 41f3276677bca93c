//! Mod settings persisted outside savegames (JSON on disk).
//!
//! Any read or parse failure logs and falls back to defaults; a broken
//! settings file must never prevent the overlay from coming up.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::elevation::ElevationMode;

/// User-facing settings that live outside the savegame.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModSettings {
    /// Global elevation policy.
    pub elevation_mode: ElevationMode,
    /// Anarchy toggle state applied after loading into a game.
    pub initial_anarchy: bool,
    /// Snapping toggle state applied after loading into a game.
    pub initial_snapping: bool,
    /// Repeat delay (seconds) for the scale/elevation hotkeys.
    pub key_repeat_delay: f32,
}

impl Default for ModSettings {
    fn default() -> Self {
        Self {
            elevation_mode: ElevationMode::TerrainFollow,
            initial_anarchy: true,
            initial_snapping: false,
            key_repeat_delay: 0.15,
        }
    }
}

impl ModSettings {
    /// Load settings, falling back to defaults on any error (including a
    /// missing file, which is the normal first-run case).
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                info!("no settings file at {}: {e}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "settings file {} is invalid, using defaults: {e}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Write settings to disk; failures are logged, not propagated.
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to encode settings: {e}");
                return;
            }
        };

        if let Err(e) = fs::write(path, json) {
            error!("failed to write settings to {}: {e}", path.display());
        }
    }
}
