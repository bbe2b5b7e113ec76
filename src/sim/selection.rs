//! Pointer-driven selection chain
//!
//! Pointer down or drag over a token tries to append it to the chain. Pointer
//! up either commits the chain (scores, removes, respawns) or cancels it.

use glam::Vec2;

use super::token::Viewport;
use super::world::World;
use crate::distance;

/// Platform input, already translated to viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    /// `pressed` is true while any pointer button is held
    PointerMove { pos: Vec2, pressed: bool },
    PointerUp,
    Reset(Viewport),
    Resize(Viewport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Selecting,
}

/// What a pointer release did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// No chain was active
    Idle,
    /// Chain too short; flags cleared, nothing scored
    Cancelled { count: usize },
    Committed { count: usize, points: u64 },
}

impl World {
    pub fn selection_phase(&self) -> SelectionPhase {
        if self.chain.is_empty() {
            SelectionPhase::Idle
        } else {
            SelectionPhase::Selecting
        }
    }

    /// Try to select every unselected token under `point`, in live order.
    ///
    /// An empty chain accepts any token. Otherwise the candidate must share
    /// the kind of the chain's first member and lie within the link distance
    /// of its last member. Returns how many tokens were appended.
    pub fn check_token(&mut self, point: Vec2) -> usize {
        let mut appended = 0;

        for i in 0..self.tokens.len() {
            let candidate = &self.tokens[i];
            if candidate.selected || !candidate.contains(point) {
                continue;
            }
            let (id, kind, pos) = (candidate.id, candidate.kind, candidate.pos);

            let eligible = match (self.chain.first(), self.chain.last()) {
                (Some(&first), Some(&last)) => {
                    let anchor_kind = self.token(first).map(|t| t.kind);
                    let tail_pos = self.token(last).map(|t| t.pos);
                    let reach = self.config.link_distance;
                    anchor_kind == Some(kind)
                        && tail_pos.is_some_and(|tail| distance(tail, pos) < reach)
                }
                _ => true,
            };

            if eligible {
                self.tokens[i].selected = true;
                self.chain.push(id);
                appended += 1;
            }
        }

        appended
    }

    /// Finish the drag: commit a long enough chain, otherwise cancel it.
    /// The chain is always empty afterwards.
    pub fn end_select(&mut self) -> SelectionOutcome {
        let count = self.chain.len();

        let outcome = if count == 0 {
            SelectionOutcome::Idle
        } else if count >= self.config.min_chain {
            let points = count as u64 * self.config.points_per_token;
            self.score += points;
            self.tokens.retain(|t| !t.selected);
            self.spawn_tokens(count);
            log::info!("Chain of {} committed (+{}), score {}", count, points, self.score);
            SelectionOutcome::Committed { count, points }
        } else {
            for token in &mut self.tokens {
                token.selected = false;
            }
            log::debug!("Chain of {} cancelled", count);
            SelectionOutcome::Cancelled { count }
        };

        self.chain.clear();
        outcome
    }
}

/// Apply one input event to the world.
///
/// Returns the outcome of a pointer release; every other event returns `None`.
pub fn handle_input(world: &mut World, event: InputEvent) -> Option<SelectionOutcome> {
    match event {
        InputEvent::PointerDown(pos) => {
            world.check_token(pos);
            None
        }
        InputEvent::PointerMove { pos, pressed } => {
            if pressed {
                world.check_token(pos);
            }
            None
        }
        InputEvent::PointerUp => Some(world.end_select()),
        InputEvent::Reset(viewport) => {
            world.reset(viewport);
            None
        }
        InputEvent::Resize(viewport) => {
            world.resize(viewport);
            None
        }
    }
}
