//! Coin Dash - a side-scrolling coin collecting platformer
//!
//! Core modules:
//! - `sim`: Deterministic frame simulation (physics, collisions, game state)
//! - `input`: Logical actions, key bindings and input snapshots
//! - `settings`: Data-driven tuning loaded from JSON

pub mod input;
pub mod settings;
pub mod sim;

pub use input::{Action, InputState, KeyBindings, SharedInput};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frames per second the tuning values are authored for
    pub const FRAME_RATE: u32 = 60;

    /// Visible canvas size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// World dimensions (world is as tall as the canvas, scrolls horizontally)
    pub const WORLD_WIDTH: f32 = 3000.0;
    pub const WORLD_HEIGHT: f32 = VIEWPORT_HEIGHT;

    /// Downward acceleration, units/frame²
    pub const GRAVITY: f32 = 0.5;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_STRENGTH: f32 = 12.0;
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 0.0;

    /// Horizontal velocity multiplier applied each frame without input
    pub const FRICTION: f32 = 0.8;
    /// Below this |vx| snaps to zero
    pub const FRICTION_EPSILON: f32 = 0.05;
    /// How far the player's feet may sink past a platform top and still land
    pub const LANDING_TOLERANCE: f32 = 5.0;
    /// Distance below the canvas bottom that triggers a respawn
    pub const RESPAWN_MARGIN: f32 = 200.0;

    /// Points per coin
    pub const COIN_REWARD: u32 = 10;
    pub const COIN_RADIUS: f32 = 10.0;
    /// Win once the player's right edge is this close to the world edge
    pub const WIN_MARGIN: f32 = 50.0;
}

/// Strict AABB overlap test, touching edges don't count
#[inline]
pub fn aabb_overlap(
    a_min: glam::Vec2,
    a_size: glam::Vec2,
    b_min: glam::Vec2,
    b_size: glam::Vec2,
) -> bool {
    a_min.x < b_min.x + b_size.x
        && a_min.x + a_size.x > b_min.x
        && a_min.y < b_min.y + b_size.y
        && a_min.y + a_size.y > b_min.y
}
