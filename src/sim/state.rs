//! Game state and core simulation types
//!
//! Pure data: nothing in here draws. A renderer reads [`GameState`] (or a
//! [`FrameView`] snapshot) after each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::camera_offset;
use super::level::Level;
use crate::consts::*;
use crate::input::{Action, InputState};
use crate::settings::{PhysicsSettings, RuleSettings, Settings};

/// World bounds and gravity. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            gravity: GRAVITY,
        }
    }
}

/// A static landing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A collectible coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    #[serde(default)]
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius,
            collected: false,
        }
    }

    /// Top-left corner and size of the collision square
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (self.pos - r, r * 2.0)
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub jump_strength: f32,
    pub on_ground: bool,
    pub spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2, physics: &PhysicsSettings) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: Vec2::new(physics.player_width, physics.player_height),
            speed: physics.player_speed,
            jump_strength: physics.jump_strength,
            on_ground: false,
            spawn,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Back to the spawn point, at rest
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
    }

    /// Whether the player's box overlaps a coin's square (strict)
    pub fn touches(&self, coin: &Coin) -> bool {
        let (coin_min, coin_size) = coin.bounds();
        crate::aabb_overlap(self.pos, self.size, coin_min, coin_size)
    }
}

/// Score and win flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub score: u32,
    pub win: bool,
}

impl GameStatus {
    /// HUD text for the current status
    pub fn message(&self) -> String {
        if self.win {
            format!("You win! Final score: {}", self.score)
        } else {
            format!("Score: {}", self.score)
        }
    }
}

/// Why the game was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    ReachedEdge,
    AllCoinsCollected,
}

/// Things that happened during the last frame, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { index: usize, score: u32 },
    Respawned,
    Won { score: u32, reason: WinReason },
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub world: World,
    pub viewport_width: f32,
    pub physics: PhysicsSettings,
    pub rules: RuleSettings,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub status: GameStatus,
    /// Frames advanced while the game was live
    pub frame: u64,
    /// Events emitted by the most recent frame
    pub events: Vec<GameEvent>,
    /// Input snapshot consumed by `advance_frame`
    #[serde(skip)]
    pub input: InputState,
}

impl GameState {
    /// Create a session on the built-in level
    pub fn new(settings: &Settings) -> Self {
        Self::with_level(settings, Level::builtin())
    }

    pub fn with_level(settings: &Settings, level: Level) -> Self {
        assert!(
            settings.world_width > settings.viewport_width,
            "world width {} must exceed viewport width {}",
            settings.world_width,
            settings.viewport_width
        );

        let physics = &settings.physics;
        assert!(
            physics.player_width > 0.0 && physics.player_height > 0.0,
            "player size must be positive, got {}x{}",
            physics.player_width,
            physics.player_height
        );
        assert!(
            physics.player_width < settings.world_width,
            "player width {} must fit in world width {}",
            physics.player_width,
            settings.world_width
        );

        let player = Player::new(level.spawn, physics);

        Self {
            world: World {
                width: settings.world_width,
                height: settings.viewport_height,
                gravity: settings.physics.gravity,
            },
            viewport_width: settings.viewport_width,
            physics: settings.physics,
            rules: settings.rules,
            player,
            platforms: level.platforms,
            coins: level.coins,
            status: GameStatus::default(),
            frame: 0,
            events: Vec::new(),
            input: InputState::default(),
        }
    }

    /// Write one action's held state; read at the start of the next frame
    pub fn set_input(&mut self, action: Action, held: bool) {
        self.input.set(action, held);
    }

    /// Replace the whole input snapshot (e.g. from a `SharedInput`)
    pub fn set_input_state(&mut self, input: InputState) {
        self.input = input;
    }

    /// Advance the simulation one frame using the stored input
    pub fn advance_frame(&mut self) {
        let input = self.input;
        super::tick::tick(self, &input);
    }

    /// Horizontal scroll offset for the current player position
    pub fn camera_x(&self) -> f32 {
        camera_offset(self.player.center_x(), self.viewport_width, self.world.width)
    }

    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }

    /// Snapshot of everything a renderer needs for this frame
    pub fn view(&self) -> FrameView {
        FrameView {
            frame: self.frame,
            player_pos: self.player.pos,
            player_size: self.player.size,
            on_ground: self.player.on_ground,
            camera_x: self.camera_x(),
            status: self.status,
            message: self.status.message(),
            coins: self.coins.iter().filter(|c| !c.collected).copied().collect(),
            platforms: self.platforms.clone(),
        }
    }
}

/// Serializable per-frame snapshot for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub frame: u64,
    pub player_pos: Vec2,
    pub player_size: Vec2,
    pub on_ground: bool,
    pub camera_x: f32,
    pub status: GameStatus,
    pub message: String,
    /// Coins still in play
    pub coins: Vec<Coin>,
    pub platforms: Vec<Platform>,
}
