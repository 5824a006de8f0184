//! Canvas 2D backend for the render sink (wasm only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{Color, Drawable, RenderSink, TextAlign};
use crate::assets::Assets;
use crate::sim::{Rect, Viewport};

/// Paints draw calls into a `CanvasRenderingContext2d` using the loaded
/// sprite images. Draw errors are non-fatal and ignored; a failed blit only
/// costs one sprite for one frame.
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    assets: Assets,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d, assets: Assets) -> Self {
        Self { ctx, assets }
    }

    /// Clear the whole viewport before a frame's draw calls
    pub fn begin_frame(&mut self, view: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(view.w), f64::from(view.h));
    }
}

impl RenderSink for CanvasSink {
    fn draw(&mut self, drawable: Drawable, dest: Rect) {
        match drawable {
            Drawable::Sprite(id) => {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    self.assets.get(id),
                    f64::from(dest.x),
                    f64::from(dest.y),
                    f64::from(dest.w),
                    f64::from(dest.h),
                );
            }
            Drawable::Fill(color) => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.fill_rect(
                    f64::from(dest.x),
                    f64::from(dest.y),
                    f64::from(dest.w),
                    f64::from(dest.h),
                );
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32, align: TextAlign) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{size}px Arial"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self
            .ctx
            .fill_text(text, f64::from(pos.x), f64::from(pos.y));
    }
}
