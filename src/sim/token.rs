//! Token entity and per-frame physics
//!
//! A token falls under a strong per-tick gravity, is damped by friction every
//! tick, clamps against the floor and walls, and pushes overlapping peers away.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::{distance, unit_at};

pub type TokenId = u32;

/// Visual and matching identity of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Cat,
    Frog,
    Rabbit,
    Pig,
    Bear,
}

impl TokenKind {
    pub const ALL: [TokenKind; 5] = [
        TokenKind::Cat,
        TokenKind::Frog,
        TokenKind::Rabbit,
        TokenKind::Pig,
        TokenKind::Bear,
    ];

    pub fn glyph(&self) -> &'static str {
        match self {
            TokenKind::Cat => "🐱",
            TokenKind::Frog => "🐸",
            TokenKind::Rabbit => "🐰",
            TokenKind::Pig => "🐷",
            TokenKind::Bear => "🐻",
        }
    }

    /// Uniform pick from the first `count` kinds of the palette
    pub fn random<R: Rng>(rng: &mut R, count: usize) -> Self {
        let count = count.clamp(1, Self::ALL.len());
        Self::ALL[rng.random_range(0..count)]
    }
}

/// Drawable area in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A falling, selectable game piece
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub kind: TokenKind,
    pub gravity: f32,
    pub friction: f32,
    pub selected: bool,
}

impl Token {
    pub fn new(id: TokenId, pos: Vec2, kind: TokenKind, config: &GameConfig) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: config.token_radius,
            kind,
            gravity: config.gravity,
            friction: config.friction,
            selected: false,
        }
    }

    /// Apply gravity and friction, integrate, then clamp to the floor and walls
    pub fn integrate(&mut self, viewport: Viewport, config: &GameConfig) {
        self.vel.y += self.gravity;
        self.vel *= self.friction;
        self.pos += self.vel;

        // Floor: near-dead bounce
        if self.pos.y + self.radius > viewport.height {
            self.pos.y = viewport.height - self.radius;
            self.vel.y *= -config.floor_restitution;
        }

        if self.pos.x + self.radius > viewport.width {
            self.pos.x = viewport.width - self.radius;
            self.vel.x *= -config.wall_restitution;
        } else if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x *= -config.wall_restitution;
        }
    }

    /// Zero out each velocity component whose magnitude is below `threshold`
    pub fn snap_velocity(&mut self, threshold: f32) {
        if self.vel.x.abs() < threshold {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < threshold {
            self.vel.y = 0.0;
        }
    }

    /// Whether `point` falls strictly inside the token's disc
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        distance(point, self.pos) < self.radius
    }
}

/// Push two overlapping tokens apart along the line joining their centers.
///
/// Both tokens receive the full push, so the pair over-corrects and settles
/// with a viscous feel. Returns whether the pair overlapped.
pub fn repel(a: &mut Token, b: &mut Token, push_factor: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_distance = a.radius + b.radius;

    if dist >= min_distance {
        return false;
    }

    // Coincident centers resolve along +x (atan2(0, 0) == 0)
    let angle = delta.y.atan2(delta.x);
    let push = unit_at(angle) * ((min_distance - dist) * push_factor);
    a.vel -= push;
    b.vel += push;
    true
}

/// Run the full per-tick update for token `index`.
///
/// Pushes are applied in place against every other token, including ones
/// already updated this tick, so results depend on iteration order.
pub fn update_at(tokens: &mut [Token], index: usize, viewport: Viewport, config: &GameConfig) {
    tokens[index].integrate(viewport, config);

    for other in 0..tokens.len() {
        if other == index {
            continue;
        }
        let (this, peer) = pair_mut(tokens, index, other);
        repel(this, peer, config.push_factor);
    }

    tokens[index].snap_velocity(config.snap_threshold);
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
