//! Game settings and tuning
//!
//! Loaded from a JSON file on native. Every field falls back to the
//! compiled-in defaults in [`crate::consts`], so a partial file is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::KeyBindings;

/// Player movement tuning, in units per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub jump_strength: f32,
    pub friction: f32,
    pub friction_epsilon: f32,
    pub landing_tolerance: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            jump_strength: PLAYER_JUMP_STRENGTH,
            friction: FRICTION,
            friction_epsilon: FRICTION_EPSILON,
            landing_tolerance: LANDING_TOLERANCE,
        }
    }
}

/// Scoring and win/lose rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub coin_reward: u32,
    pub win_margin: f32,
    pub respawn_margin: f32,
    /// Also win once every coin is collected
    pub win_on_all_coins: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            coin_reward: COIN_REWARD,
            win_margin: WIN_MARGIN,
            respawn_margin: RESPAWN_MARGIN,
            win_on_all_coins: false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Simulation ===
    pub physics: PhysicsSettings,
    pub rules: RuleSettings,

    // === Controls ===
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            physics: PhysicsSettings::default(),
            rules: RuleSettings::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether the world can actually scroll under these settings
    pub fn is_scrollable(&self) -> bool {
        self.world_width > self.viewport_width
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) if settings.is_scrollable() => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(settings) => {
                log::warn!(
                    "Settings world width {} does not exceed viewport {}, using defaults",
                    settings.world_width,
                    settings.viewport_width
                );
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
