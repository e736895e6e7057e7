//! Force coupling between a rope end and an external dynamic body.
//!
//! A dynamic body cannot be hard-pinned to the rope (or the rope to it)
//! without injecting energy, so the gap is closed from both sides: the body
//! receives a clamped spring-damper force and the rope's end node is nudged
//! part of the way toward the body.

use crate::float::{epsilon, Float};
use crate::node::RopeNode;
use crate::vec::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The physics-engine body a rope end is coupled to.
pub trait DynamicBody<F: Float> {
    fn position(&self) -> Vec2<F>;
    fn velocity(&self) -> Vec2<F>;
    fn mass(&self) -> F;
    /// Accumulate a force for the body's next integration.
    fn apply_force(&mut self, force: Vec2<F>);
}

/// Minimal point-mass body with semi-implicit Euler integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointBody<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub mass: F,
    pub gravity: Vec2<F>,
    force: Vec2<F>,
}

impl<F: Float> PointBody<F> {
    pub fn new(position: Vec2<F>, mass: F) -> Self {
        PointBody {
            position,
            velocity: Vec2::zero(),
            mass,
            gravity: Vec2::zero(),
            force: Vec2::zero(),
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Force accumulated since the last integration.
    pub fn pending_force(&self) -> Vec2<F> {
        self.force
    }

    pub fn integrate(&mut self, dt: F) {
        let inv_mass = if self.mass > epsilon() { F::one() / self.mass } else { F::zero() };
        let accel = self.gravity + self.force.scale(inv_mass);
        self.velocity = self.velocity + accel.scale(dt);
        self.position = self.position + self.velocity.scale(dt);
        self.force = Vec2::zero();
    }
}

impl<F: Float> DynamicBody<F> for PointBody<F> {
    fn position(&self) -> Vec2<F> { self.position }
    fn velocity(&self) -> Vec2<F> { self.velocity }
    fn mass(&self) -> F { self.mass }
    fn apply_force(&mut self, force: Vec2<F>) {
        self.force = self.force + force;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeConfig<F: Float> {
    /// Node-to-body distance below which no force acts.
    pub rest_length: F,
    /// Spring constant applied to the stretch beyond `rest_length`.
    pub stiffness: F,
    /// Damping on the body's velocity along the rope direction.
    pub damping: F,
    pub max_force: F,
    /// Share of the stretch closed by moving the rope node, in [0, 1].
    pub node_move_factor: F,
}

impl<F: Float> Default for BridgeConfig<F> {
    fn default() -> Self {
        BridgeConfig {
            rest_length: F::from_f32(0.2),
            stiffness: F::from_f32(50.0),
            damping: F::from_f32(5.0),
            max_force: F::from_f32(50.0),
            node_move_factor: F::from_f32(0.1),
        }
    }
}

/// What one bridge application did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BridgeOutcome<F: Float> {
    /// Force handed to the body.
    pub force: Vec2<F>,
    /// Displacement applied to the rope node.
    pub node_shift: Vec2<F>,
}

impl<F: Float> BridgeOutcome<F> {
    pub fn is_active(&self) -> bool {
        self.force != Vec2::zero() || self.node_shift != Vec2::zero()
    }
}

/// Couple `node` to `body` for one tick.
///
/// Slack (distance at most `rest_length`) or coincident points produce no
/// force. Otherwise the body is pulled toward the node with
/// `stiffness * stretch - damping * v_along`, clamped to `[0, max_force]`,
/// and the node moves `stretch * node_move_factor` toward the body unless
/// it is pinned.
pub fn apply_bridge_force<F: Float, B: DynamicBody<F> + ?Sized>(
    node: &mut RopeNode<F>,
    body: &mut B,
    config: &BridgeConfig<F>,
) -> BridgeOutcome<F> {
    let delta = node.pos - body.position();
    let dist = delta.length();
    if dist < epsilon() || dist <= config.rest_length {
        return BridgeOutcome::default();
    }
    let dir = delta.scale(F::one() / dist);
    let stretch = dist - config.rest_length;

    let velocity_along = body.velocity().dot(dir);
    let magnitude = (config.stiffness * stretch - config.damping * velocity_along)
        .clamp(F::zero(), config.max_force);
    let force = dir.scale(magnitude);
    if magnitude > F::zero() {
        body.apply_force(force);
    }

    let mut node_shift = Vec2::zero();
    if !node.pinned {
        let factor = config.node_move_factor.clamp(F::zero(), F::one());
        node_shift = dir.scale(-(stretch * factor));
        node.pos = node.pos + node_shift;
    }

    log::trace!("bridge force {:?}, node shift {:?}", force, node_shift);
    BridgeOutcome { force, node_shift }
}
