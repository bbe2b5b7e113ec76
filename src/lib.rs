//! Tsum Drop - a drag-to-chain falling token game
//!
//! Core modules:
//! - `sim`: Simulation (token physics, spawning, selection chain)
//! - `renderer`: Display list generation and the 2D canvas backend
//! - `config`: Data-driven tuning constants

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. One tick is one frame of the per-frame physics.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation timestep in milliseconds (spawn staggering runs on this clock)
    pub const SIM_DT_MS: f32 = SIM_DT * 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Token defaults
    pub const TOKEN_RADIUS: f32 = 35.0;
    pub const TOKEN_GRAVITY: f32 = 0.8;
    pub const TOKEN_FRICTION: f32 = 0.8;
    /// Bounce factors applied to the velocity component on clamping
    pub const FLOOR_RESTITUTION: f32 = 0.1;
    pub const WALL_RESTITUTION: f32 = 0.5;
    /// Fraction of overlap converted into separation velocity
    pub const PUSH_FACTOR: f32 = 0.1;
    /// Velocity components below this snap to zero
    pub const SNAP_THRESHOLD: f32 = 0.05;

    /// Max distance from the last chain member for a token to extend the chain
    pub const LINK_DISTANCE: f32 = 120.0;
    pub const MIN_CHAIN: usize = 3;
    pub const POINTS_PER_TOKEN: u64 = 100;

    /// Spawning
    pub const INITIAL_TOKENS: usize = 40;
    pub const SPAWN_STAGGER_MS: f32 = 50.0;
    pub const SPAWN_HEIGHT: f32 = -100.0;

    /// Selection highlight extends this far past the token radius
    pub const HIGHLIGHT_PAD: f32 = 5.0;
    pub const TRAIL_WIDTH: f32 = 8.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector at `angle` radians (x right, y down in screen space)
#[inline]
pub fn unit_at(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
