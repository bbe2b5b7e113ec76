//! Display list generation
//!
//! Turns the world into a flat list of draw commands each frame. Backends only
//! have to know how to execute these primitives.

use glam::Vec2;

use crate::consts::{HIGHLIGHT_PAD, TRAIL_WIDTH};
use crate::sim::{Token, World};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const HIGHLIGHT: Color = [1.0, 1.0, 1.0, 0.5];
    pub const TRAIL: Color = [1.0, 1.0, 1.0, 0.8];
    pub const GLYPH: Color = [1.0, 1.0, 1.0, 1.0];
}

/// Font family used for token glyphs
pub const GLYPH_FONT: &str = "Arial";

/// Rendering primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Text centered on `center`, `size` px tall
    Glyph {
        center: Vec2,
        text: &'static str,
        size: f32,
        color: Color,
    },
    /// Stroked line through `points` with round joins and caps
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: Color,
    },
}

/// CSS `rgba()` string for a color
pub fn css_color(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Commands for one token: highlight disc (if selected) beneath its glyph
pub fn token_commands(token: &Token, out: &mut Vec<DrawCommand>) {
    if token.selected {
        out.push(DrawCommand::FillCircle {
            center: token.pos,
            radius: token.radius + HIGHLIGHT_PAD,
            color: colors::HIGHLIGHT,
        });
    }
    out.push(DrawCommand::Glyph {
        center: token.pos,
        text: token.kind.glyph(),
        size: token.radius * 2.0,
        color: colors::GLYPH,
    });
}

/// Build the full frame: clear, selection trail, then every token in live order
pub fn build_frame(world: &World) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(world.tokens.len() * 2 + 2);

    commands.push(DrawCommand::Clear {
        width: world.viewport.width,
        height: world.viewport.height,
    });

    let trail = world.chain_positions();
    if !trail.is_empty() {
        commands.push(DrawCommand::Polyline {
            points: trail,
            width: TRAIL_WIDTH,
            color: colors::TRAIL,
        });
    }

    for token in &world.tokens {
        token_commands(token, &mut commands);
    }

    commands
}
