//! Rope nodes: Verlet points with implicit velocity.

use crate::float::Float;
use crate::vec::Vec2;

/// One point of a rope chain.
///
/// Velocity is never stored; it is `pos - prev_pos` per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RopeNode<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub pinned: bool,
}

impl<F: Float> RopeNode<F> {
    /// A free node at rest.
    pub fn new(pos: Vec2<F>) -> Self {
        RopeNode { pos, prev_pos: pos, pinned: false }
    }

    /// A pinned node at rest.
    pub fn pinned(pos: Vec2<F>) -> Self {
        RopeNode { pos, prev_pos: pos, pinned: true }
    }

    /// Per-tick displacement.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    pub fn pin(&mut self) {
        self.pinned = true;
        self.prev_pos = self.pos;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    /// Place the node at `pos` and zero its implied velocity.
    pub fn hold_at(&mut self, pos: Vec2<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Add a velocity impulse by shifting the previous position.
    pub fn push(&mut self, impulse: Vec2<F>) {
        if !self.pinned {
            self.prev_pos = self.prev_pos - impulse;
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.prev_pos.is_finite()
    }
}
