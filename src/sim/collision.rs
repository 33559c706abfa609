//! Collision detection and response
//!
//! Platforms are one-sided landing surfaces: the player can jump up through
//! them and walk through their sides. Only a downward (or resting) sweep of
//! the player's feet across a platform top counts as a landing.

use super::state::{Coin, Platform, Player};

/// Resolve landings against every platform, in order.
///
/// Recomputes `on_ground` from scratch. When several platforms match in the
/// same frame each snaps the player in turn, so the last one wins.
/// Returns the index of the platform the player ended up standing on.
pub fn land_on_platforms(
    player: &mut Player,
    platforms: &[Platform],
    tolerance: f32,
) -> Option<usize> {
    player.on_ground = false;
    let mut landed = None;

    for (i, platform) in platforms.iter().enumerate() {
        if lands_on(player, platform, tolerance) {
            player.pos.y = platform.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
            landed = Some(i);
        }
    }

    landed
}

/// Whether the player's feet cross `platform`'s top this frame.
///
/// The feet must be at or above the top (within `tolerance`) and the
/// projected position one `vel.y` further must reach it.
pub fn lands_on(player: &Player, platform: &Platform, tolerance: f32) -> bool {
    let bottom = player.bottom();
    player.vel.y >= 0.0
        && player.right() > platform.left()
        && player.pos.x < platform.right()
        && bottom <= platform.top() + tolerance
        && bottom + player.vel.y >= platform.top()
}

/// Flag every coin the player overlaps. Returns indices of newly collected coins.
///
/// Coins are flagged rather than removed, so indices stay stable and a coin
/// can never be counted twice.
pub fn collect_coins(player: &Player, coins: &mut [Coin]) -> Vec<usize> {
    let mut collected = Vec::new();
    for (i, coin) in coins.iter_mut().enumerate() {
        if !coin.collected && player.touches(coin) {
            coin.collected = true;
            collected.push(i);
        }
    }
    collected
}
