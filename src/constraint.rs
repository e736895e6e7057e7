//! Distance constraint relaxation along the chain.

use crate::float::{epsilon, Float};
use crate::node::RopeNode;

/// Iteratively pull every adjacent pair toward `rest_length`.
///
/// One sweep walks the pairs `(i, i + 1)` in order, Gauss-Seidel style.
/// A pinned node never moves; its free neighbour takes the whole
/// correction. Pairs closer than [`epsilon`] are skipped for that sweep.
/// After each sweep both endpoints, if pinned, are put back to the
/// positions they had when the call started.
pub fn relax<F: Float>(nodes: &mut [RopeNode<F>], rest_length: F, iterations: usize) {
    let count = nodes.len();
    if count < 2 || iterations == 0 {
        return;
    }
    let first = nodes[0];
    let last = nodes[count - 1];

    for _ in 0..iterations {
        for i in 0..count - 1 {
            solve_pair(nodes, i, rest_length);
        }
        if first.pinned {
            nodes[0] = first;
        }
        if last.pinned {
            nodes[count - 1] = last;
        }
    }
}

fn solve_pair<F: Float>(nodes: &mut [RopeNode<F>], i: usize, rest_length: F) {
    let a = nodes[i];
    let b = nodes[i + 1];
    if a.pinned && b.pinned {
        return;
    }
    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist < epsilon() {
        return;
    }
    let correction = delta.scale((dist - rest_length) / dist);

    match (a.pinned, b.pinned) {
        (true, false) => nodes[i + 1].pos = b.pos - correction,
        (false, true) => nodes[i].pos = a.pos + correction,
        _ => {
            let half = correction.scale(F::half());
            nodes[i].pos = a.pos + half;
            nodes[i + 1].pos = b.pos - half;
        }
    }
}
