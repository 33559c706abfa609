//! Horizontal follow camera
//!
//! Stateless: recomputed every frame from the player position.

/// Scroll offset that centers `focus_x` in the viewport, clamped so the
/// viewport never shows past either world edge.
///
/// Requires `world_width > viewport_width`.
#[inline]
pub fn camera_offset(focus_x: f32, viewport_width: f32, world_width: f32) -> f32 {
    (focus_x - viewport_width / 2.0).clamp(0.0, world_width - viewport_width)
}
