//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform and
//! rendering dependencies:
//! - Fixed timestep only (one tick per 60 Hz display frame)
//! - Seeded RNG only
//! - Stable iteration order over the live token list

pub mod selection;
pub mod spawn;
pub mod token;
pub mod world;

pub use selection::{InputEvent, SelectionOutcome, SelectionPhase, handle_input};
pub use spawn::{PendingSpawn, SpawnQueue};
pub use token::{Token, TokenId, TokenKind, Viewport, repel, update_at};
pub use world::World;
