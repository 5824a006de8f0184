//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per display frame
//! - Stable iteration order (level-table order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use camera::camera_x;
pub use rect::{lands_on, Rect};
pub use state::{
    Block, BlockKind, Coin, Enemy, Fireball, GameState, Player, PowerUp, PowerUpKind,
    SessionPhase, Viewport,
};
pub use tick::{tick, TickInput};
