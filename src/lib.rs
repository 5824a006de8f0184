//! Tilehop - a side-scrolling coin-and-powerup platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Declarative draw-call adapter with a Canvas 2D backend
//! - `assets`: Image loading barrier (wasm only)
//! - `input`: Logical key mapping

#[cfg(target_arch = "wasm32")]
pub mod assets;
pub mod input;
pub mod render;
pub mod sim;

/// Game tuning constants
///
/// The simulation runs one step per display frame, so velocities and
/// accelerations are in pixels per frame (or per frame squared).
pub mod consts {
    /// Downward acceleration applied every frame
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal run speed while a direction key is held
    pub const MOVE_SPEED: f32 = 4.0;
    /// Vertical impulse applied on jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -10.0;

    /// Total level width in pixels
    pub const LEVEL_LENGTH: f32 = 2500.0;
    /// Height of the ground tile row
    pub const GROUND_HEIGHT: f32 = 40.0;

    /// Player spawn position and starting size
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Size multiplier applied by the mushroom power-up (each axis)
    pub const GROW_FACTOR: f32 = 1.5;

    /// Coin and power-up pickup sizes
    pub const COIN_SIZE: f32 = 32.0;
    pub const POWERUP_SIZE: f32 = 32.0;

    /// Enemy size and patrol speed
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Ledge probe offsets: 1 px ahead of the leading edge, 5 px below the feet
    pub const PROBE_AHEAD: f32 = 1.0;
    pub const PROBE_BELOW: f32 = 5.0;

    /// Fireball projectile size and horizontal speed
    pub const FIREBALL_SIZE: f32 = 16.0;
    pub const FIREBALL_SPEED: f32 = 6.0;

    /// How far above a solid's top the player's feet may be and still land
    pub const LAND_TOLERANCE: f32 = 10.0;
    /// How far past the bottom of the viewport counts as falling out
    pub const FALL_MARGIN: f32 = 100.0;
}
