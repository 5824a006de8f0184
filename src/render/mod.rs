//! Render adapter
//!
//! The simulation never draws. After each step the frame walker
//! [`draw_frame`] reads the state and emits declarative draw calls into a
//! [`RenderSink`]; sinks never write back. The Canvas 2D backend lives in
//! [`canvas`] (wasm only); tests use a recording sink.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;

use glam::Vec2;

use crate::sim::{BlockKind, GameState, PowerUpKind, Rect, SessionPhase, Viewport};

/// Symbolic names for the fixed sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Background,
    Player,
    Tile,
    Coin,
    Enemy,
    Pipe,
    Mushroom,
    Fireball,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::Background,
        SpriteId::Player,
        SpriteId::Tile,
        SpriteId::Coin,
        SpriteId::Enemy,
        SpriteId::Pipe,
        SpriteId::Mushroom,
        SpriteId::Fireball,
    ];

    /// Asset file stem for this sprite
    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::Background => "background",
            SpriteId::Player => "player",
            SpriteId::Tile => "tile",
            SpriteId::Coin => "coin",
            SpriteId::Enemy => "enemy",
            SpriteId::Pipe => "pipe",
            SpriteId::Mushroom => "mushroom",
            SpriteId::Fireball => "fireball",
        }
    }

    /// Position in [`SpriteId::ALL`], used as the asset table index
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// An RGBA color for fills and text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    /// Coin-kind block fill
    pub const BROWN: Color = Color::rgb(0x8b, 0x45, 0x13);
    /// Power-up block fill
    pub const GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);
    /// Half-transparent black, dims the scene behind terminal overlays
    pub const SCRIM: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.5,
    };

    /// CSS color string for the canvas backend
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// What to paint into a destination rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawable {
    Sprite(SpriteId),
    Fill(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Receiver for one frame's draw calls, in paint order
pub trait RenderSink {
    fn draw(&mut self, drawable: Drawable, dest: Rect);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32, align: TextAlign);
}

/// Shift a world rectangle into viewport coordinates
fn to_view(rect: Rect, camera_x: f32) -> Rect {
    Rect::new(rect.x - camera_x, rect.y, rect.w, rect.h)
}

/// Emit the draw calls for one frame, back to front
pub fn draw_frame(state: &GameState, view: Viewport, sink: &mut impl RenderSink) {
    let cam = state.camera_x;

    // Background, tiled across the whole level width
    if view.w > 0.0 {
        let mut x = 0.0;
        while x < state.level_length {
            sink.draw(
                Drawable::Sprite(SpriteId::Background),
                Rect::new(x - cam, 0.0, view.w, view.h),
            );
            x += view.w;
        }
    }

    for tile in &state.tiles {
        sink.draw(Drawable::Sprite(SpriteId::Tile), to_view(*tile, cam));
    }
    for pipe in &state.pipes {
        sink.draw(Drawable::Sprite(SpriteId::Pipe), to_view(*pipe, cam));
    }
    for block in &state.blocks {
        let color = match block.kind {
            BlockKind::Coin => Color::BROWN,
            BlockKind::Mushroom | BlockKind::Fire => Color::GOLD,
        };
        sink.draw(Drawable::Fill(color), to_view(block.rect, cam));
    }
    for coin in state.coins.iter().filter(|c| !c.collected) {
        sink.draw(Drawable::Sprite(SpriteId::Coin), to_view(coin.rect, cam));
    }
    for powerup in state.powerups.iter().filter(|p| p.active) {
        let sprite = match powerup.kind {
            PowerUpKind::Mushroom => SpriteId::Mushroom,
            PowerUpKind::Fire => SpriteId::Fireball,
        };
        sink.draw(Drawable::Sprite(sprite), to_view(powerup.rect, cam));
    }
    for enemy in state.enemies.iter().filter(|e| e.alive) {
        sink.draw(Drawable::Sprite(SpriteId::Enemy), to_view(enemy.rect, cam));
    }
    for fireball in &state.fireballs {
        sink.draw(
            Drawable::Sprite(SpriteId::Fireball),
            to_view(fireball.rect, cam),
        );
    }
    sink.draw(
        Drawable::Sprite(SpriteId::Player),
        to_view(state.player.rect(), cam),
    );

    sink.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(20.0, 30.0),
        Color::WHITE,
        20.0,
        TextAlign::Left,
    );

    let (headline, color) = match state.phase {
        SessionPhase::Playing => return,
        SessionPhase::Won => ("You Win!", Color::GREEN),
        SessionPhase::Lost => ("Game Over", Color::RED),
    };
    let center = Vec2::new(view.w / 2.0, view.h / 2.0);
    sink.draw(
        Drawable::Fill(Color::SCRIM),
        Rect::new(0.0, 0.0, view.w, view.h),
    );
    sink.draw_text(headline, center, color, 48.0, TextAlign::Center);
    sink.draw_text(
        "Press ENTER to restart",
        center + Vec2::new(0.0, 40.0),
        color,
        20.0,
        TextAlign::Center,
    );
}
