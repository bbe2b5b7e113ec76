//! 2D canvas backend (WASM only)
//!
//! Executes the display list on a `CanvasRenderingContext2d`. Glyphs go
//! through the browser's font rasterizer, which is what lets tokens be emoji.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{DrawCommand, GLYPH_FONT, css_color};

pub struct CanvasBackend {
    pub canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasBackend {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Draw a whole frame. Failed commands are logged and skipped.
    pub fn execute(&self, commands: &[DrawCommand]) {
        for command in commands {
            if let Err(e) = self.draw(command) {
                log::warn!("Draw error: {:?}", e);
            }
        }
    }

    fn draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.set_fill_style_str(&css_color(*color));
                ctx.fill();
            }
            DrawCommand::Glyph {
                center,
                text,
                size,
                color,
            } => {
                ctx.save();
                ctx.set_font(&format!("{}px {}", size, GLYPH_FONT));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_fill_style_str(&css_color(*color));
                let result = ctx.fill_text(text, center.x as f64, center.y as f64);
                ctx.restore();
                result?;
            }
            DrawCommand::Polyline {
                points,
                width,
                color,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.save();
                ctx.begin_path();
                ctx.set_stroke_style_str(&css_color(*color));
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                ctx.set_line_join("round");
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.stroke();
                ctx.restore();
            }
        }
        Ok(())
    }
}
