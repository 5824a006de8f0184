//! Horizontal scroll policy
//!
//! A pure function of the player position and the level/viewport bounds,
//! recomputed every frame with no smoothing or memory of prior frames.

/// Scroll offset that centers the viewport on the player, clamped so the
/// camera never shows past either end of the level and never goes negative.
pub fn camera_x(player_x: f32, level_length: f32, view_w: f32) -> f32 {
    (player_x - view_w / 2.0).min(level_length - view_w).max(0.0)
}
