//! World state and the per-tick simulation
//!
//! All mutable game state lives here: live tokens, the selection chain, the
//! score, the viewport and the pending spawns.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::spawn::SpawnQueue;
use super::token::{Token, TokenId, TokenKind, Viewport, update_at};
use crate::config::GameConfig;
use crate::consts::SIM_DT_MS;

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    pub viewport: Viewport,
    /// Live tokens in insertion order (iteration order drives settling)
    pub tokens: Vec<Token>,
    /// Selected token ids, in selection order
    pub chain: Vec<TokenId>,
    /// Only ever increased by committed chains
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    spawns: SpawnQueue,
    rng: Pcg32,
    next_id: TokenId,
}

impl World {
    /// Create an empty world. Call [`World::reset`] to drop in the first batch.
    pub fn new(seed: u64, viewport: Viewport, config: GameConfig) -> Self {
        Self {
            config,
            viewport,
            tokens: Vec::new(),
            chain: Vec::new(),
            score: 0,
            time_ticks: 0,
            spawns: SpawnQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new token ID
    pub fn next_entity_id(&mut self) -> TokenId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Discard every token and the chain, then queue a fresh batch.
    /// The score is kept.
    pub fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.tokens.clear();
        self.chain.clear();
        if self.config.cancel_pending_on_reset {
            self.spawns.clear();
        }
        self.spawn_tokens(self.config.initial_tokens);
        log::info!(
            "World reset ({}x{}), {} tokens queued",
            viewport.width,
            viewport.height,
            self.spawns.len()
        );
    }

    /// Viewport changed: existing tokens are not repositioned, the world restarts
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!("Resize to {}x{}", viewport.width, viewport.height);
        self.reset(viewport);
    }

    /// Queue `count` tokens, staggered so they fall in one after another
    pub fn spawn_tokens(&mut self, count: usize) {
        for i in 0..count {
            let x = self.rng.random::<f32>() * self.viewport.width;
            self.spawns.schedule(i as f32 * self.config.spawn_stagger_ms, x);
        }
    }

    /// Place a token immediately at `pos`, bypassing the spawn queue
    pub fn insert_token(&mut self, pos: Vec2, kind: TokenKind) -> TokenId {
        let id = self.next_entity_id();
        self.tokens.push(Token::new(id, pos, kind, &self.config));
        id
    }

    fn land(&mut self, x: f32) {
        let kind = TokenKind::random(&mut self.rng, self.config.kind_count);
        let drift = self.config.spawn_drift;
        let vx = if drift > 0.0 {
            self.rng.random_range(-drift..drift)
        } else {
            0.0
        };
        let id = self.next_entity_id();
        let pos = Vec2::new(x, self.config.spawn_height);
        let mut token = Token::new(id, pos, kind, &self.config);
        token.vel.x = vx;
        self.tokens.push(token);
    }

    /// Advance one fixed timestep: land due spawns, then update every token
    /// in stable order.
    pub fn tick(&mut self) {
        let due = self.spawns.advance(SIM_DT_MS);
        if !due.is_empty() {
            log::debug!("{} token(s) landed", due.len());
        }
        for x in due {
            self.land(x);
        }

        self.step_physics();
        self.time_ticks += 1;
    }

    /// Run the in-place, order-dependent update pass over all tokens
    pub fn step_physics(&mut self) {
        for i in 0..self.tokens.len() {
            update_at(&mut self.tokens, i, self.viewport, &self.config);
        }
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Current centers of the chain members, in selection order
    pub fn chain_positions(&self) -> Vec<Vec2> {
        self.chain
            .iter()
            .filter_map(|&id| self.token(id).map(|t| t.pos))
            .collect()
    }

    pub fn pending_spawns(&self) -> usize {
        self.spawns.len()
    }
}
