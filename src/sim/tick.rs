//! Per-frame simulation tick
//!
//! Core game loop step. Units are per frame: the tuning values assume the
//! host calls this at [`crate::consts::FRAME_RATE`].

use super::collision::{collect_coins, land_on_platforms};
use super::state::{GameEvent, GameState, WinReason};
use crate::input::InputState;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &InputState) {
    state.events.clear();

    // Gameplay freezes once won
    if state.status.win {
        return;
    }

    state.frame += 1;

    update_player(state, input);

    let tolerance = state.physics.landing_tolerance;
    land_on_platforms(&mut state.player, &state.platforms, tolerance);

    pick_up_coins(state);
    check_win(state);
}

/// Horizontal control, jump, gravity and fall-out recovery
fn update_player(state: &mut GameState, input: &InputState) {
    let world = state.world;
    let physics = state.physics;
    let player = &mut state.player;

    // Right is evaluated last so it wins when both are held
    let mut steering = false;
    if input.left {
        player.vel.x = -player.speed;
        steering = true;
    }
    if input.right {
        player.vel.x = player.speed;
        steering = true;
    }
    if !steering {
        player.vel.x *= physics.friction;
        if player.vel.x.abs() < physics.friction_epsilon {
            player.vel.x = 0.0;
        }
    }

    player.pos.x += player.vel.x;
    let max_x = world.width - player.size.x;
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    } else if player.pos.x > max_x {
        player.pos.x = max_x;
        player.vel.x = 0.0;
    }

    // Level-triggered: holding jump re-jumps as soon as we land again
    if input.jump && player.on_ground {
        player.vel.y = -player.jump_strength;
        player.on_ground = false;
    }

    player.vel.y += world.gravity;
    player.pos.y += player.vel.y;

    if player.pos.y > world.height + state.rules.respawn_margin {
        log::debug!(
            "Player fell out at ({:.1}, {:.1}), respawning",
            player.pos.x,
            player.pos.y
        );
        player.respawn();
        player.pos.x = player.pos.x.clamp(0.0, max_x);
        state.events.push(GameEvent::Respawned);
    }
}

fn pick_up_coins(state: &mut GameState) {
    let reward = state.rules.coin_reward;
    for index in collect_coins(&state.player, &mut state.coins) {
        state.status.score += reward;
        log::debug!("Coin {} collected, score {}", index, state.status.score);
        state.events.push(GameEvent::CoinCollected {
            index,
            score: state.status.score,
        });
    }
}

fn check_win(state: &mut GameState) {
    let reason = if state.player.right() > state.world.width - state.rules.win_margin {
        WinReason::ReachedEdge
    } else if state.rules.win_on_all_coins && state.coins.iter().all(|c| c.collected) {
        WinReason::AllCoinsCollected
    } else {
        return;
    };

    state.status.win = true;
    log::info!(
        "Won on frame {} ({:?}) with score {}",
        state.frame,
        reason,
        state.status.score
    );
    state.events.push(GameEvent::Won {
        score: state.status.score,
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::input::Action;
    use crate::settings::Settings;
    use glam::Vec2;

    const GROUND_TOP: f32 = 550.0;

    fn new_state() -> GameState {
        GameState::new(&Settings::default())
    }

    /// Run idle frames until the player settles on the ground below spawn
    fn landed_state() -> GameState {
        let mut state = new_state();
        for _ in 0..100 {
            state.advance_frame();
            if state.player.on_ground {
                return state;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_lands_on_ground_exactly() {
        let state = landed_state();
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.pos.y + state.player.size.y, GROUND_TOP);
        assert_eq!(state.player.pos.x, SPAWN_X);
    }

    #[test]
    fn test_stays_grounded_while_resting() {
        let mut state = landed_state();
        for _ in 0..10 {
            state.advance_frame();
            assert!(state.player.on_ground);
            assert_eq!(state.player.vel.y, 0.0);
            assert_eq!(state.player.bottom(), GROUND_TOP);
        }
    }

    #[test]
    fn test_friction_converges_to_zero() {
        let mut state = landed_state();
        state.player.vel.x = PLAYER_SPEED;
        for _ in 0..25 {
            state.advance_frame();
        }
        assert_eq!(state.player.vel.x, 0.0);

        let x = state.player.pos.x;
        state.advance_frame();
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_hold_right_walks_along_ground() {
        let mut state = new_state();
        state.set_input(Action::Right, true);
        for frame in 1..=100 {
            state.advance_frame();
            assert_eq!(state.player.pos.x, SPAWN_X + PLAYER_SPEED * frame as f32);
        }
        assert_eq!(state.player.pos.x, 550.0);
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.bottom(), GROUND_TOP);
    }

    #[test]
    fn test_right_overrides_left() {
        let mut state = new_state();
        state.set_input(Action::Left, true);
        state.set_input(Action::Right, true);
        state.advance_frame();
        assert_eq!(state.player.vel.x, PLAYER_SPEED);
        assert_eq!(state.player.pos.x, SPAWN_X + PLAYER_SPEED);
    }

    #[test]
    fn test_left_edge_clamps_and_stops() {
        let mut state = new_state();
        state.set_input(Action::Left, true);
        for _ in 0..15 {
            state.advance_frame();
            assert!(state.player.pos.x >= 0.0);
        }
        assert_eq!(state.player.pos.x, 0.0);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn test_right_edge_clamps_and_stops() {
        let mut state = new_state();
        state.rules.win_margin = 0.0; // keep the game live at the edge
        state.player.pos = Vec2::new(WORLD_WIDTH - PLAYER_WIDTH - 2.0, 500.0);
        state.set_input(Action::Right, true);
        state.advance_frame();
        assert_eq!(state.player.pos.x, WORLD_WIDTH - PLAYER_WIDTH);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut state = landed_state();
        state.set_input(Action::Jump, true);
        state.advance_frame();
        assert!(!state.player.on_ground);
        assert_eq!(state.player.vel.y, -PLAYER_JUMP_STRENGTH + GRAVITY);
        assert!(state.player.bottom() < GROUND_TOP);
    }

    #[test]
    fn test_jump_ignored_in_air() {
        let mut state = new_state();
        state.set_input(Action::Jump, true);
        state.advance_frame();
        assert_eq!(state.player.vel.y, GRAVITY);
    }

    #[test]
    fn test_held_jump_retriggers_after_landing() {
        let mut state = landed_state();
        state.set_input(Action::Jump, true);
        let takeoff_vy = -PLAYER_JUMP_STRENGTH + GRAVITY;
        let mut takeoffs = 0;
        for _ in 0..200 {
            state.advance_frame();
            if state.player.vel.y == takeoff_vy {
                takeoffs += 1;
            }
        }
        assert!(takeoffs >= 2, "only {} takeoffs", takeoffs);
    }

    #[test]
    fn test_respawn_after_falling_out() {
        let mut state = new_state();
        state.player.pos = Vec2::new(850.0, WORLD_HEIGHT + RESPAWN_MARGIN + 1.0);
        state.player.vel = Vec2::new(3.0, 15.0);
        state.advance_frame();
        assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.events, vec![GameEvent::Respawned]);
    }

    #[test]
    fn test_respawn_keeps_player_in_bounds() {
        // Levels built in code skip validation, so respawn must clamp on its own
        let settings = Settings::default();
        let mut level = crate::sim::Level::builtin();
        level.spawn = Vec2::new(5000.0, 0.0);
        let mut state = GameState::with_level(&settings, level);

        state.player.pos = Vec2::new(100.0, WORLD_HEIGHT + RESPAWN_MARGIN + 1.0);
        state.advance_frame();

        let max_x = state.world.width - state.player.size.x;
        assert!(state.events.contains(&GameEvent::Respawned));
        assert_eq!(state.player.pos.x, max_x);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_falling_into_gap_respawns() {
        let mut state = new_state();
        // Over the first gap (800..900)
        state.player.pos = Vec2::new(835.0, 0.0);
        let mut respawned = false;
        for _ in 0..200 {
            state.advance_frame();
            if state.events.contains(&GameEvent::Respawned) {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn test_collect_all_coins() {
        let mut state = new_state();
        let centers: Vec<Vec2> = state.coins.iter().map(|c| c.pos).collect();
        let mut last_score = 0;
        for (i, center) in centers.iter().enumerate() {
            state.player.pos = *center - state.player.size / 2.0;
            state.player.vel = Vec2::ZERO;
            state.advance_frame();
            assert!(state.status.score >= last_score);
            last_score = state.status.score;
            assert_eq!(state.status.score, COIN_REWARD * (i as u32 + 1));
            assert_eq!(
                state.events,
                vec![GameEvent::CoinCollected {
                    index: i,
                    score: state.status.score
                }]
            );
        }
        assert_eq!(state.status.score, 80);
        assert_eq!(state.coins_remaining(), 0);
        // All coins alone is not a win by default
        assert!(!state.status.win);

        // Standing on a collected coin again scores nothing
        state.player.pos = centers[0] - state.player.size / 2.0;
        state.advance_frame();
        assert_eq!(state.status.score, 80);
    }

    #[test]
    fn test_all_coins_win_when_enabled() {
        let mut settings = Settings::default();
        settings.rules.win_on_all_coins = true;
        let mut state = GameState::new(&settings);
        for coin in state.coins.iter_mut().skip(1) {
            coin.collected = true;
        }
        state.player.pos = state.coins[0].pos - state.player.size / 2.0;
        state.advance_frame();
        assert!(state.status.win);
        assert!(state.events.contains(&GameEvent::Won {
            score: COIN_REWARD,
            reason: WinReason::AllCoinsCollected
        }));
    }

    #[test]
    fn test_win_threshold_is_strict() {
        let mut state = new_state();
        state.player.pos = Vec2::new(WORLD_WIDTH - WIN_MARGIN - PLAYER_WIDTH, 500.0);
        state.advance_frame();
        assert!(!state.status.win);

        state.player.pos.x += 1.0;
        state.advance_frame();
        assert!(state.status.win);
        assert_eq!(
            state.events,
            vec![GameEvent::Won {
                score: 0,
                reason: WinReason::ReachedEdge
            }]
        );
    }

    #[test]
    fn test_win_freezes_gameplay() {
        let mut state = new_state();
        state.player.pos = Vec2::new(2940.0, 500.0);
        state.advance_frame();
        assert!(state.status.win);
        let frame = state.frame;
        let pos = state.player.pos;

        state.set_input(Action::Left, true);
        state.set_input(Action::Jump, true);
        for _ in 0..30 {
            state.advance_frame();
        }
        assert!(state.status.win);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.frame, frame);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = new_state();
        assert_eq!(state.camera_x(), 0.0);
        state.player.pos.x = 1000.0;
        assert_eq!(state.camera_x(), 1000.0 + PLAYER_WIDTH / 2.0 - VIEWPORT_WIDTH / 2.0);
        state.player.pos.x = WORLD_WIDTH - PLAYER_WIDTH;
        assert_eq!(state.camera_x(), WORLD_WIDTH - VIEWPORT_WIDTH);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();

        let inputs = [
            InputState {
                right: true,
                ..Default::default()
            },
            InputState {
                right: true,
                jump: true,
                ..Default::default()
            },
            InputState {
                left: true,
                ..Default::default()
            },
            InputState::default(),
        ];

        for input in inputs.iter().cycle().take(400) {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.status, state2.status);
    }
}
