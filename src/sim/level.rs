//! Level geometry
//!
//! The game ships a single compiled-in level. A level can also be described
//! in JSON with the same shape as [`Level`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{Coin, Platform};
use crate::consts::*;
use crate::settings::Settings;

/// Platforms as (x, y, width, height)
const BUILTIN_PLATFORMS: [(f32, f32, f32, f32); 8] = [
    // Ground segments, with two gaps to jump
    (0.0, 550.0, 800.0, 50.0),
    (900.0, 550.0, 700.0, 50.0),
    (1750.0, 550.0, 1250.0, 50.0),
    // Ledges
    (300.0, 430.0, 150.0, 20.0),
    (550.0, 340.0, 150.0, 20.0),
    (1000.0, 420.0, 200.0, 20.0),
    (1350.0, 330.0, 150.0, 20.0),
    (2100.0, 400.0, 200.0, 20.0),
];

/// Coin centers
const BUILTIN_COINS: [(f32, f32); 8] = [
    (375.0, 400.0),
    (625.0, 310.0),
    (850.0, 480.0),
    (1100.0, 390.0),
    (1425.0, 300.0),
    (1675.0, 480.0),
    (2200.0, 370.0),
    (2600.0, 520.0),
];

/// Level loading/validation errors
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read level: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid level json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level has no platforms")]
    NoPlatforms,

    #[error("platform {index} has a non-positive size")]
    InvalidPlatform { index: usize },

    #[error("coin {index} has a non-positive radius")]
    InvalidCoin { index: usize },

    #[error("coin {index} lies outside the world")]
    CoinOutOfWorld { index: usize },

    #[error("spawn point ({x}, {y}) lies outside the world")]
    SpawnOutOfWorld { x: f32, y: f32 },
}

/// Static level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    #[serde(default = "default_spawn")]
    pub spawn: Vec2,
}

fn default_spawn() -> Vec2 {
    Vec2::new(SPAWN_X, SPAWN_Y)
}

impl Level {
    /// The compiled-in level
    pub fn builtin() -> Self {
        Self {
            platforms: BUILTIN_PLATFORMS
                .iter()
                .map(|&(x, y, w, h)| Platform::new(x, y, w, h))
                .collect(),
            coins: BUILTIN_COINS
                .iter()
                .map(|&(x, y)| Coin::new(x, y, COIN_RADIUS))
                .collect(),
            spawn: default_spawn(),
        }
    }

    /// Parse and validate a level against the world described by `settings`
    pub fn from_json(json: &str, settings: &Settings) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate(settings)?;
        Ok(level)
    }

    pub fn validate(&self, settings: &Settings) -> Result<(), LevelError> {
        let world_width = settings.world_width;
        let world_height = settings.viewport_height;

        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        if let Some(index) = self
            .platforms
            .iter()
            .position(|p| p.size.x <= 0.0 || p.size.y <= 0.0)
        {
            return Err(LevelError::InvalidPlatform { index });
        }
        for (index, coin) in self.coins.iter().enumerate() {
            if coin.radius <= 0.0 {
                return Err(LevelError::InvalidCoin { index });
            }
            let inside = (0.0..=world_width).contains(&coin.pos.x)
                && (0.0..=world_height).contains(&coin.pos.y);
            if !inside {
                return Err(LevelError::CoinOutOfWorld { index });
            }
        }

        // Respawn puts the player straight back here, so it must satisfy the
        // horizontal bounds on its own
        let max_x = world_width - settings.physics.player_width;
        let spawn_ok = (0.0..=max_x).contains(&self.spawn.x)
            && (0.0..=world_height).contains(&self.spawn.y);
        if !spawn_ok {
            return Err(LevelError::SpawnOutOfWorld {
                x: self.spawn.x,
                y: self.spawn.y,
            });
        }
        Ok(())
    }

    pub fn load(path: &Path, settings: &Settings) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, settings)
    }
}
