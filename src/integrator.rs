//! Verlet integration of free rope nodes.

use crate::float::Float;
use crate::node::RopeNode;
use crate::vec::Vec2;

/// Gravity acceleration vector for a scalar magnitude pulling toward -Y.
pub fn gravity_vector<F: Float>(gravity: F) -> Vec2<F> {
    Vec2::new(F::zero(), -gravity)
}

/// Advance every unpinned node by one step.
///
/// `velocity = (pos - prev) * damping`, then `pos += velocity + gravity * dt^2`.
/// Damping scales the implied velocity before gravity is added. When
/// `max_speed` is set the implied velocity is first capped at `max_speed * dt`.
pub fn integrate<F: Float>(
    nodes: &mut [RopeNode<F>],
    gravity: Vec2<F>,
    damping: F,
    dt: F,
    max_speed: Option<F>,
) {
    let accel_step = gravity.scale(dt * dt);
    let max_step = max_speed.map(|s| s * dt);
    for node in nodes.iter_mut() {
        if node.pinned {
            continue;
        }
        let mut velocity = node.velocity_raw();
        if let Some(limit) = max_step {
            velocity = velocity.clamp_length(limit);
        }
        let velocity = velocity.scale(damping);
        node.prev_pos = node.pos;
        node.pos = node.pos + velocity + accel_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_first_step() {
        let mut nodes = [RopeNode::new(Vec2::new(0.0f32, 0.0))];
        integrate(&mut nodes, gravity_vector(10.0), 1.0, 0.1, None);
        assert!((nodes[0].pos.y + 0.1).abs() < 1e-6);
        assert_eq!(nodes[0].prev_pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn pinned_nodes_skipped() {
        let mut nodes = [RopeNode::pinned(Vec2::new(5.0f32, 5.0))];
        integrate(&mut nodes, gravity_vector(9.81), 0.99, 1.0 / 60.0, None);
        assert_eq!(nodes[0].pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn damping_scales_velocity() {
        let mut node = RopeNode::new(Vec2::new(1.0f32, 0.0));
        node.prev_pos = Vec2::new(0.0, 0.0);
        let mut nodes = [node];
        integrate(&mut nodes, Vec2::zero(), 0.5, 1.0, None);
        assert!((nodes[0].pos.x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn max_speed_caps_step() {
        let mut node = RopeNode::new(Vec2::new(100.0f32, 0.0));
        node.prev_pos = Vec2::new(0.0, 0.0);
        let mut nodes = [node];
        integrate(&mut nodes, Vec2::zero(), 1.0, 0.1, Some(10.0));
        assert!((nodes[0].pos.x - 101.0).abs() < 1e-4);
    }
}
