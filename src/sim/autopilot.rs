//! Demo autopilot
//!
//! Runs right and hops whenever the ground ahead runs out. Used by the
//! headless driver and as an end-to-end check of the built-in level.

use super::state::GameState;
use crate::input::InputState;

/// How far past the player's leading edge to look for ground
const LOOKAHEAD: f32 = 40.0;

/// Pick this frame's input from the current state
pub fn autopilot_input(state: &GameState) -> InputState {
    let player = &state.player;
    let ahead_x = player.right() + LOOKAHEAD;
    let feet = player.bottom();

    let ground_ahead = state
        .platforms
        .iter()
        .any(|p| p.left() <= ahead_x && ahead_x <= p.right() && (p.top() - feet).abs() < 1.0);

    InputState {
        left: false,
        right: true,
        jump: player.on_ground && !ground_ahead,
    }
}
