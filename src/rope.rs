//! The rope aggregate: nodes, configuration, anchors, and one physics step.

use crate::anchor::{self, Anchor, REEL_THRESHOLD};
use crate::config::RopeConfig;
use crate::constraint;
use crate::error::RopeError;
use crate::float::Float;
use crate::integrator::{self, gravity_vector};
use crate::length;
use crate::node::RopeNode;
use crate::observer::StepObserver;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// A Verlet rope. Index 0 is the start side, the last index the end side.
///
/// The node array is owned exclusively. Renderers read [`Rope::positions`]
/// or [`Rope::nodes`] between ticks; only the crate's own components mutate
/// nodes.
#[derive(Clone, Debug)]
pub struct Rope<F: Float> {
    nodes: AllocVec<RopeNode<F>>,
    config: RopeConfig<F>,
    start: Anchor<F>,
    end: Anchor<F>,
    simulate: bool,
}

impl<F: Float> Rope<F> {
    /// Wrap an existing node array. Fails on fewer than two nodes, an
    /// invalid config, or non-finite positions.
    pub fn from_nodes(
        nodes: AllocVec<RopeNode<F>>,
        config: RopeConfig<F>,
        start: Anchor<F>,
        end: Anchor<F>,
    ) -> Result<Self, RopeError> {
        if nodes.len() < 2 {
            return Err(RopeError::TooFewNodes(nodes.len()));
        }
        config.validate()?;
        let rope = Rope { nodes, config, start, end, simulate: true };
        rope.check_finite()?;
        Ok(rope)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a live rope; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[RopeNode<F>] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [RopeNode<F>] {
        &mut self.nodes
    }

    pub fn node(&self, index: usize) -> &RopeNode<F> {
        &self.nodes[index]
    }

    pub fn first(&self) -> &RopeNode<F> {
        &self.nodes[0]
    }

    pub fn last(&self) -> &RopeNode<F> {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Current world positions, start to end.
    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.nodes.iter().map(|n| n.pos).collect()
    }

    pub fn config(&self) -> &RopeConfig<F> {
        &self.config
    }

    pub fn start_anchor(&self) -> &Anchor<F> {
        &self.start
    }

    pub fn end_anchor(&self) -> &Anchor<F> {
        &self.end
    }

    pub fn set_start_anchor(&mut self, anchor: Anchor<F>) {
        self.start = anchor;
    }

    pub fn set_end_anchor(&mut self, anchor: Anchor<F>) {
        self.end = anchor;
    }

    /// Update anchor positions for the coming tick. `None` leaves an end as is.
    pub fn move_anchors(&mut self, start: Option<Vec2<F>>, end: Option<Vec2<F>>) {
        if let Some(p) = start {
            self.start.set_position(p);
        }
        if let Some(p) = end {
            self.end.set_position(p);
        }
    }

    pub fn is_simulating(&self) -> bool {
        self.simulate
    }

    pub fn set_simulating(&mut self, simulate: bool) {
        self.simulate = simulate;
    }

    pub fn pinned_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.pinned).count()
    }

    /// Pinned nodes other than the two endpoints (held by the winch).
    pub fn pinned_interior_count(&self) -> usize {
        let n = self.nodes.len();
        self.nodes[1..n - 1].iter().filter(|n| n.pinned).count()
    }

    pub fn both_ends_pinned(&self) -> bool {
        self.first().pinned && self.last().pinned
    }

    pub fn current_length(&self) -> F {
        length::current_length(&self.nodes)
    }

    pub fn ideal_length(&self) -> F {
        length::ideal_length(&self.nodes, self.config.segment_length)
    }

    pub fn max_length(&self) -> F {
        length::max_length(self.ideal_length(), self.config.max_stretch_factor)
    }

    pub fn is_taut(&self) -> bool {
        length::is_taut(self.current_length(), self.ideal_length(), self.config.taut_hysteresis)
    }

    pub fn stretch_ratio(&self) -> F {
        length::stretch_ratio(self.current_length(), self.max_length())
    }

    pub fn should_warn(&self) -> bool {
        length::should_warn(self.current_length(), self.max_length(), self.config.warning_ratio)
    }

    pub fn longest_segment(&self) -> F {
        length::longest_segment(&self.nodes)
    }

    /// Pin the endpoints to their anchors.
    pub fn sync_anchors(&mut self) {
        anchor::sync(&mut self.nodes, &self.start, &self.end, F::from_f32(REEL_THRESHOLD));
    }

    /// Integrate free nodes over `dt` using the configured gravity and damping.
    pub fn integrate(&mut self, dt: F) {
        integrator::integrate(
            &mut self.nodes,
            gravity_vector(self.config.gravity),
            self.config.damping,
            dt,
            self.config.max_speed,
        );
    }

    /// Relax all segments toward the configured segment length.
    pub fn relax(&mut self) {
        constraint::relax(&mut self.nodes, self.config.segment_length, self.config.constraint_iterations);
    }

    /// One tick: anchor sync, integration and relaxation, repeated for each
    /// substep. Does nothing while simulation is disabled.
    ///
    /// Returns [`RopeError::NonFinite`] if any node left the finite range.
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<(), RopeError> {
        if !self.simulate {
            return Ok(());
        }
        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / F::from_f32(substeps as f32);

        for _sub in 0..substeps {
            self.sync_anchors();
            observer.on_anchor_sync();

            self.integrate(sub_dt);
            observer.on_integrate();

            for i in 0..self.config.constraint_iterations {
                constraint::relax(&mut self.nodes, self.config.segment_length, 1);
                observer.on_constraint_iteration(i);
            }
        }

        observer.on_step_complete();
        self.check_finite()
    }

    /// First node with a non-finite position, as an error.
    pub fn check_finite(&self) -> Result<(), RopeError> {
        match self.nodes.iter().position(|n| !n.is_finite()) {
            Some(index) => Err(RopeError::NonFinite { index }),
            None => Ok(()),
        }
    }
}
