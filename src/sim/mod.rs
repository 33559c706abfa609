//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Stable iteration order (platforms and coins in level order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use camera::camera_offset;
pub use collision::{collect_coins, land_on_platforms, lands_on};
pub use level::{Level, LevelError};
pub use state::{
    Coin, FrameView, GameEvent, GameState, GameStatus, Platform, Player, WinReason, World,
};
pub use tick::tick;
