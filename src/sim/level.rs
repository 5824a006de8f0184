//! Compiled-in level geometry
//!
//! One fixed 2500 px level. Vertical placement derives from the viewport
//! height sampled at load time, so the ground hugs the bottom of the screen;
//! the tables are otherwise constant. Gaps between ground tiles are
//! fall-through hazards.

use super::rect::Rect;
use super::state::{Block, BlockKind, Coin, Enemy};
use crate::consts::*;

/// Y coordinate of the interactive block row
fn block_row_y(view_h: f32) -> f32 {
    view_h - 150.0
}

/// Ground tiles, with gaps between them
pub fn tiles(view_h: f32) -> Vec<Rect> {
    let y = view_h - GROUND_HEIGHT;
    vec![
        Rect::new(0.0, y, 300.0, GROUND_HEIGHT),
        Rect::new(400.0, y, 300.0, GROUND_HEIGHT),
        Rect::new(800.0, y, 200.0, GROUND_HEIGHT),
        Rect::new(1100.0, y, 300.0, GROUND_HEIGHT),
        Rect::new(1500.0, y, 300.0, GROUND_HEIGHT),
        Rect::new(1900.0, y, 400.0, GROUND_HEIGHT),
    ]
}

/// Pipes: standable solids, not probed by enemy ledge detection
pub fn pipes(view_h: f32) -> Vec<Rect> {
    vec![Rect::new(1250.0, view_h - 80.0, 60.0, 80.0)]
}

/// Interactive blocks, hit from below to consume
pub fn blocks(view_h: f32) -> Vec<Block> {
    let y = block_row_y(view_h);
    [
        (600.0, BlockKind::Coin),
        (950.0, BlockKind::Mushroom),
        (1400.0, BlockKind::Fire),
    ]
    .into_iter()
    .map(|(x, kind)| Block {
        rect: Rect::new(x, y, 40.0, 40.0),
        kind,
        consumed: false,
    })
    .collect()
}

/// Free-floating coins, placed just above the block row
pub fn coins(view_h: f32) -> Vec<Coin> {
    let y = block_row_y(view_h) - 50.0;
    [550.0, 900.0, 1350.0]
        .into_iter()
        .map(|x| Coin {
            rect: Rect::new(x, y, COIN_SIZE, COIN_SIZE),
            collected: false,
        })
        .collect()
}

/// Patrolling enemies, standing on the ground row
pub fn enemies(view_h: f32) -> Vec<Enemy> {
    let y = view_h - 80.0;
    vec![Enemy::new(700.0, y, 1.0), Enemy::new(1550.0, y, -1.0)]
}
