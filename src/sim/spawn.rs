//! Staggered spawn queue
//!
//! Spawns are requested in batches and land one by one as their countdown
//! expires, so new tokens trickle in from above instead of appearing at once.

use serde::{Deserialize, Serialize};

/// A token waiting to land
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingSpawn {
    /// Time left before landing (ms)
    pub remaining_ms: f32,
    /// Horizontal landing position, fixed when the spawn was requested
    pub x: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnQueue {
    pending: Vec<PendingSpawn>,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay_ms: f32, x: f32) {
        self.pending.push(PendingSpawn {
            remaining_ms: delay_ms,
            x,
        });
    }

    /// Count down every pending spawn and return the x of each one now due,
    /// in request order.
    pub fn advance(&mut self, elapsed_ms: f32) -> Vec<f32> {
        let mut due = Vec::new();
        self.pending.retain_mut(|spawn| {
            spawn.remaining_ms -= elapsed_ms;
            if spawn.remaining_ms <= 0.0 {
                due.push(spawn.x);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
