//! Endpoint anchors and per-tick anchor synchronization.

use crate::float::Float;
use crate::node::RopeNode;
use crate::vec::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance under which a pinned node counts as stacked on an endpoint.
pub const REEL_THRESHOLD: f32 = 0.01;

/// External attachment state for one rope end.
///
/// `position` is written by the owner every tick before the pipeline runs.
/// A detached end is never force-pinned and behaves as a free end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor<F: Float> {
    pub position: Option<Vec2<F>>,
    pub detached: bool,
}

impl<F: Float> Anchor<F> {
    pub fn at(position: Vec2<F>) -> Self {
        Anchor { position: Some(position), detached: false }
    }

    pub fn detached() -> Self {
        Anchor { position: None, detached: true }
    }

    /// No anchor position and not detached: the end is left to whatever
    /// else drives it (for example a force bridge).
    pub fn unbound() -> Self {
        Anchor { position: None, detached: false }
    }

    /// Position to pin to this tick, if any.
    pub fn target(&self) -> Option<Vec2<F>> {
        if self.detached { None } else { self.position }
    }

    pub fn set_position(&mut self, position: Vec2<F>) {
        self.position = Some(position);
    }
}

/// Pin both endpoints to their anchors.
///
/// A synced endpoint gets `pos` and `prev_pos` set to the anchor, so it
/// carries no velocity. Pinned interior nodes stacked on the endpoint
/// (within `stack_threshold`) are carried along with it. On the start side
/// the first pinned node past the stack, one the winch holds partway out,
/// is carried too so it keeps its offset from the stack.
pub fn sync<F: Float>(
    nodes: &mut [RopeNode<F>],
    start: &Anchor<F>,
    end: &Anchor<F>,
    stack_threshold: F,
) {
    let count = nodes.len();
    if count < 2 {
        return;
    }
    if let Some(target) = start.target() {
        move_endpoint(nodes, 0, target, stack_threshold, true, 1..count - 1);
    }
    if let Some(target) = end.target() {
        move_endpoint(nodes, count - 1, target, stack_threshold, false, (1..count - 1).rev());
    }
}

fn move_endpoint<F: Float, I: Iterator<Item = usize>>(
    nodes: &mut [RopeNode<F>],
    endpoint: usize,
    target: Vec2<F>,
    stack_threshold: F,
    carry_held: bool,
    interior: I,
) {
    let old = nodes[endpoint].pos;
    let shift = target - old;
    if shift != Vec2::zero() {
        for i in interior {
            let node = nodes[i];
            if !node.pinned {
                break;
            }
            let stacked = node.pos.distance(old) <= stack_threshold;
            if stacked || carry_held {
                nodes[i].hold_at(node.pos + shift);
            }
            if !stacked {
                break;
            }
        }
    }
    nodes[endpoint].hold_at(target);
    nodes[endpoint].pinned = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> [RopeNode<f32>; 4] {
        [
            RopeNode::new(Vec2::new(0.0, 0.0)),
            RopeNode::new(Vec2::new(1.0, 0.0)),
            RopeNode::new(Vec2::new(2.0, 0.0)),
            RopeNode::new(Vec2::new(3.0, 0.0)),
        ]
    }

    #[test]
    fn pins_and_zeroes_velocity() {
        let mut nodes = chain();
        nodes[3].prev_pos = Vec2::new(2.5, 0.0);
        sync(&mut nodes, &Anchor::at(Vec2::new(0.0, 1.0)), &Anchor::at(Vec2::new(3.0, 1.0)), 0.01);
        assert!(nodes[0].pinned && nodes[3].pinned);
        assert_eq!(nodes[3].velocity_raw(), Vec2::zero());
        assert_eq!(nodes[3].pos, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn detached_end_left_free() {
        let mut nodes = chain();
        let end = Anchor { position: Some(Vec2::new(9.0, 9.0)), detached: true };
        sync(&mut nodes, &Anchor::at(Vec2::new(0.0, 0.0)), &end, 0.01);
        assert!(!nodes[3].pinned);
        assert_eq!(nodes[3].pos, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn stacked_nodes_follow_start() {
        let mut nodes = chain();
        nodes[0].pinned = true;
        nodes[1] = RopeNode::pinned(Vec2::new(0.0, 0.0));
        sync(&mut nodes, &Anchor::at(Vec2::new(0.0, 2.0)), &Anchor::unbound(), 0.01);
        assert_eq!(nodes[1].pos, Vec2::new(0.0, 2.0));
        assert_eq!(nodes[2].pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn partly_held_node_follows_start() {
        let mut nodes = chain();
        nodes[0].pinned = true;
        nodes[1] = RopeNode::pinned(Vec2::new(0.0, 0.0));
        nodes[2] = RopeNode::pinned(Vec2::new(0.5, 0.0));
        sync(&mut nodes, &Anchor::at(Vec2::new(1.0, 2.0)), &Anchor::unbound(), 0.01);
        assert_eq!(nodes[1].pos, Vec2::new(1.0, 2.0));
        assert_eq!(nodes[2].pos, Vec2::new(1.5, 2.0));
        assert_eq!(nodes[3].pos, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn end_side_leaves_held_nodes_alone() {
        let mut nodes = chain();
        nodes[2] = RopeNode::pinned(Vec2::new(2.0, 0.0));
        nodes[3].pinned = true;
        sync(&mut nodes, &Anchor::unbound(), &Anchor::at(Vec2::new(3.0, 1.0)), 0.01);
        assert_eq!(nodes[2].pos, Vec2::new(2.0, 0.0));
        assert_eq!(nodes[3].pos, Vec2::new(3.0, 1.0));
    }
}
