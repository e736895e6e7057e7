//! Length and tautness measures, recomputed from node state on every call.

use crate::float::{epsilon, Float};
use crate::node::RopeNode;

/// Sum of the live distances between consecutive nodes.
pub fn current_length<F: Float>(nodes: &[RopeNode<F>]) -> F {
    nodes
        .windows(2)
        .fold(F::zero(), |sum, pair| sum + pair[0].pos.distance(pair[1].pos))
}

/// Sum of per-segment rest lengths.
///
/// A segment between two pinned nodes rests at its live distance, any other
/// segment at `segment_length`. Anchors dragged apart therefore grow the
/// ideal length even though `segment_length` never changes.
pub fn ideal_length<F: Float>(nodes: &[RopeNode<F>], segment_length: F) -> F {
    nodes.windows(2).fold(F::zero(), |sum, pair| {
        let rest = if pair[0].pinned && pair[1].pinned {
            pair[0].pos.distance(pair[1].pos)
        } else {
            segment_length
        };
        sum + rest
    })
}

pub fn max_length<F: Float>(ideal: F, max_stretch_factor: F) -> F {
    ideal * max_stretch_factor
}

/// True when the live length exceeds the ideal length scaled by `hysteresis`.
pub fn is_taut<F: Float>(current: F, ideal: F, hysteresis: F) -> bool {
    current > ideal * hysteresis
}

/// `current / max`, or zero for a degenerate max length.
pub fn stretch_ratio<F: Float>(current: F, max: F) -> F {
    if max <= epsilon() {
        F::zero()
    } else {
        current / max
    }
}

/// Warning signal for renderers: the rope is close to its maximum length.
pub fn should_warn<F: Float>(current: F, max: F, warning_ratio: F) -> bool {
    max > epsilon() && current >= max * warning_ratio
}

pub fn longest_segment<F: Float>(nodes: &[RopeNode<F>]) -> F {
    nodes
        .windows(2)
        .fold(F::zero(), |best, pair| best.max(pair[0].pos.distance(pair[1].pos)))
}
