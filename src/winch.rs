//! Winch-style retract/release by progressively pinning nodes at the start.
//!
//! Reeled-in nodes are pinned and stacked on node 0. Retracting walks the
//! next node in toward the stack until it joins it; releasing walks the
//! outermost held node back out until it is a full segment away, then
//! lets it go.

use crate::anchor::REEL_THRESHOLD;
use crate::float::Float;
use crate::rope::Rope;
use crate::vec::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WinchConfig<F: Float> {
    /// Reel-in speed in distance per second.
    pub retract_speed: F,
    /// Pay-out speed in distance per second.
    pub release_speed: F,
    pub min_speed: F,
    pub max_speed: F,
    /// Distance under which a pinned node counts as reeled onto node 0.
    pub reel_threshold: F,
}

impl<F: Float> Default for WinchConfig<F> {
    fn default() -> Self {
        WinchConfig {
            retract_speed: F::from_f32(1.5),
            release_speed: F::from_f32(1.5),
            min_speed: F::from_f32(0.2),
            max_speed: F::from_f32(10.0),
            reel_threshold: F::from_f32(REEL_THRESHOLD),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WinchState {
    #[default]
    Idle,
    Retracting,
    Releasing,
}

/// Retract/release controller for one rope.
#[derive(Clone, Debug)]
pub struct Winch<F: Float> {
    config: WinchConfig<F>,
    state: WinchState,
    speed_multiplier: F,
}

impl<F: Float> Winch<F> {
    pub fn new(config: WinchConfig<F>) -> Self {
        Winch { config, state: WinchState::Idle, speed_multiplier: F::one() }
    }

    pub fn config(&self) -> &WinchConfig<F> {
        &self.config
    }

    pub fn state(&self) -> WinchState {
        self.state
    }

    pub fn is_retracting(&self) -> bool {
        self.state == WinchState::Retracting
    }

    pub fn is_releasing(&self) -> bool {
        self.state == WinchState::Releasing
    }

    /// Scale both speeds. Clamped to [0.1, 5].
    pub fn set_speed_multiplier(&mut self, multiplier: F) {
        self.speed_multiplier = multiplier.clamp(F::from_f32(0.1), F::from_f32(5.0));
    }

    pub fn speed_multiplier(&self) -> F {
        self.speed_multiplier
    }

    pub fn start_retract(&mut self) {
        self.state = WinchState::Retracting;
    }

    pub fn stop_retract(&mut self) {
        if self.state == WinchState::Retracting {
            self.state = WinchState::Idle;
        }
    }

    pub fn start_release(&mut self) {
        self.state = WinchState::Releasing;
    }

    pub fn stop_release(&mut self) {
        if self.state == WinchState::Releasing {
            self.state = WinchState::Idle;
        }
    }

    fn effective_speed(&self, base: F) -> F {
        (base * self.speed_multiplier).clamp(self.config.min_speed, self.config.max_speed)
    }

    /// Advance the active operation by `dt` seconds.
    pub fn update(&mut self, rope: &mut Rope<F>, dt: F) {
        match self.state {
            WinchState::Idle => {}
            WinchState::Retracting => {
                let amount = self.effective_speed(self.config.retract_speed) * dt;
                if !self.apply_retract(rope, amount) {
                    log::warn!("retract found no node to reel in; stopping");
                    self.state = WinchState::Idle;
                }
            }
            WinchState::Releasing => {
                let amount = self.effective_speed(self.config.release_speed) * dt;
                if !self.apply_release(rope, amount) {
                    log::warn!("release found no node to pay out; stopping");
                    self.state = WinchState::Idle;
                }
            }
        }
    }

    /// Last pinned node, scanning back from the end side, that sits on node 0.
    pub fn last_reeled_index(&self, rope: &Rope<F>) -> Option<usize> {
        let n = rope.len();
        let anchor = rope.first().pos;
        (0..n - 1).rev().find(|&i| {
            let node = rope.node(i);
            node.pinned && node.pos.distance(anchor) <= self.config.reel_threshold
        })
    }

    fn retract_index(&self, rope: &Rope<F>) -> Option<usize> {
        let next = self.last_reeled_index(rope)? + 1;
        (next < rope.len() - 1).then_some(next)
    }

    fn release_index(&self, rope: &Rope<F>) -> Option<usize> {
        let last = self.last_reeled_index(rope)?;
        let interior_end = rope.len() - 1;
        if last + 1 < interior_end && rope.node(last + 1).pinned {
            Some(last + 1)
        } else if last > 0 {
            Some(last)
        } else {
            None
        }
    }

    fn apply_retract(&self, rope: &mut Rope<F>, amount: F) -> bool {
        let Some(index) = self.retract_index(rope) else {
            return false;
        };
        let nodes = rope.nodes_mut();
        let prev = nodes[index - 1].pos;
        let here = nodes[index].pos;
        let next = nodes[index + 1].pos;
        let target = (here.distance(prev) - amount).max(F::zero());
        let pos = Vec2::point_on_line(prev, next, target, here - prev);
        nodes[index].hold_at(pos);
        nodes[index].pinned = true;
        true
    }

    fn apply_release(&self, rope: &mut Rope<F>, amount: F) -> bool {
        let Some(index) = self.release_index(rope) else {
            return false;
        };
        let segment_length = rope.config().segment_length;
        let nodes = rope.nodes_mut();
        let prev = nodes[index - 1].pos;
        let here = nodes[index].pos;
        let next = nodes[index + 1].pos;
        let target = (here.distance(prev) + amount).min(segment_length);
        let pos = Vec2::point_on_line(prev, next, target, Vec2::down());
        nodes[index].hold_at(pos);
        if target >= segment_length {
            nodes[index].unpin();
        }
        true
    }
}

impl<F: Float> Default for Winch<F> {
    fn default() -> Self {
        Self::new(WinchConfig::default())
    }
}
