//! Game state and core simulation types
//!
//! Plain mutable records, one collection per entity kind, all owned by
//! [`GameState`]. The `collected`/`consumed`/`alive` flags are monotonic:
//! once flipped they never revert within a session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level;
use super::rect::Rect;
use crate::consts::*;

/// Current phase of the session
///
/// `Won` and `Lost` are terminal: the simulation stops advancing except for
/// restart detection. Modeling this as an enum makes the two terminal states
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    Won,
    Lost,
}

/// The visible drawing area, re-read from the canvas every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub is_big: bool,
    pub has_fire: bool,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, 0.0),
            size: Vec2::splat(PLAYER_SIZE),
            vel: Vec2::ZERO,
            on_ground: false,
            is_big: false,
            has_fire: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// What an interactive block yields when hit from below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Consumed on hit but yields no reward object and no score.
    Coin,
    Mushroom,
    Fire,
}

/// An interactive block, solid like a tile but one-shot consumable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub kind: BlockKind,
    pub consumed: bool,
}

/// A collectible coin placed in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    pub collected: bool,
}

/// Ability granted by a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Grow the player by [`GROW_FACTOR`] on each axis
    Mushroom,
    /// Grant the fireball ability
    Fire,
}

/// A pickup spawned above a consumed block; single-use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub active: bool,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Facing direction: +1 right, -1 left
    pub dir: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, dir: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            dir,
            speed: ENEMY_SPEED,
            alive: true,
        }
    }
}

/// A fireball projectile; lives until it hits an enemy, a tile, or leaves
/// the level bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub rect: Rect,
    pub dx: f32,
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: SessionPhase,
    /// Coins collected so far
    pub score: u32,
    /// Simulation frame counter
    pub frame: u64,
    /// Total level width; the win line is its right edge
    pub level_length: f32,
    /// Viewport height sampled at level load; ground geometry derives from
    /// it and stays frozen across resizes
    pub level_view_h: f32,
    /// Horizontal scroll offset, recomputed at the end of every step
    pub camera_x: f32,
    pub player: Player,
    pub tiles: Vec<Rect>,
    pub pipes: Vec<Rect>,
    pub blocks: Vec<Block>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
    pub fireballs: Vec<Fireball>,
}

impl GameState {
    /// Build a fresh session with level geometry anchored to the viewport
    /// height at load time.
    pub fn new(view_h: f32) -> Self {
        Self {
            phase: SessionPhase::Playing,
            score: 0,
            frame: 0,
            level_length: LEVEL_LENGTH,
            level_view_h: view_h,
            camera_x: 0.0,
            player: Player::spawn(),
            tiles: level::tiles(view_h),
            pipes: level::pipes(view_h),
            blocks: level::blocks(view_h),
            coins: level::coins(view_h),
            powerups: Vec::new(),
            enemies: level::enemies(view_h),
            fireballs: Vec::new(),
        }
    }

    /// Whether the session has reached a terminal state
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase != SessionPhase::Playing
    }
}
