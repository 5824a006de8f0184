//! Logical key mapping
//!
//! Translates physical key codes into the game's logical keys and folds
//! press/release events into the per-frame [`TickInput`]. Movement and jump
//! carry held state; shoot and restart are one-shot flags the frame loop
//! clears after each tick.

use crate::sim::TickInput;

/// Logical keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Jump,
    Shoot,
    Restart,
}

impl Key {
    /// Map a `KeyboardEvent.code` value to a logical key
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Key::MoveRight),
            "Space" | "ArrowUp" | "KeyW" => Some(Key::Jump),
            "KeyF" => Some(Key::Shoot),
            "Enter" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Fold a key transition into the pending input for the next tick
pub fn apply_key(input: &mut TickInput, key: Key, pressed: bool, repeat: bool) {
    match key {
        Key::MoveLeft => input.left = pressed,
        Key::MoveRight => input.right = pressed,
        Key::Jump => input.jump = pressed,
        Key::Shoot => {
            // Edge-triggered: auto-repeat must not refire
            if pressed && !repeat {
                input.shoot = true;
            }
        }
        Key::Restart => {
            if pressed {
                input.restart = true;
            }
        }
    }
}
