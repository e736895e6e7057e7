//! Initial node layout for a new rope.

use crate::anchor::Anchor;
use crate::config::RopeConfig;
use crate::error::RopeError;
use crate::float::{epsilon, Float};
use crate::node::RopeNode;
use crate::rope::Rope;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Largest node count a builder will allocate.
pub const MAX_NODES: usize = 65_536;

/// How nodes are spread between the two build points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeLayout {
    /// `n - 1` equal segments exactly spanning start to end. The chain is
    /// neither slack nor taut on spawn, so nothing snaps on the first tick.
    #[default]
    CompressStretch,
    /// Nodes `segment_length` apart along start -> end, whatever the distance.
    FixedLength,
}

/// Produces node arrays (or whole ropes) from two points and a config.
#[derive(Clone, Debug)]
pub struct RopeBuilder<F: Float> {
    config: RopeConfig<F>,
    node_count: Option<usize>,
    layout: NodeLayout,
    fit_segment_length: bool,
}

impl<F: Float> RopeBuilder<F> {
    pub fn new(config: RopeConfig<F>) -> Self {
        RopeBuilder { config, node_count: None, layout: NodeLayout::default(), fit_segment_length: false }
    }

    /// Fix the node count instead of deriving it from the anchor distance.
    pub fn with_node_count(mut self, count: usize) -> Self {
        self.node_count = Some(count);
        self
    }

    pub fn with_layout(mut self, layout: NodeLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Make [`RopeBuilder::build_rope`] rewrite `segment_length` so the
    /// links exactly cover `distance * slack_factor`. Without it the rest
    /// length is taken from the config as is.
    pub fn with_fitted_segment_length(mut self) -> Self {
        self.fit_segment_length = true;
        self
    }

    /// Node count derived from `distance * slack_factor / segment_length`.
    ///
    /// Saturates just above [`MAX_NODES`] so oversized spans are rejected by
    /// [`RopeBuilder::build`] rather than allocated.
    pub fn derived_node_count(&self, start: Vec2<F>, end: Vec2<F>) -> usize {
        let length = start.distance(end) * self.config.slack_factor;
        let segments = (length / self.config.segment_length).round().to_f32();
        if segments.is_nan() || segments <= 0.0 {
            return 2;
        }
        let segments = segments.min(MAX_NODES as f32) as usize;
        segments.saturating_add(1).max(2)
    }

    /// Build the node array. Never returns a partial chain.
    pub fn build(
        &self,
        start: Vec2<F>,
        end: Vec2<F>,
        pin_start: bool,
        pin_end: bool,
    ) -> Result<AllocVec<RopeNode<F>>, RopeError> {
        self.config.validate()?;
        if !start.is_finite() || !end.is_finite() {
            return Err(RopeError::InvalidConfig("build points must be finite"));
        }
        let count = self
            .node_count
            .unwrap_or_else(|| self.derived_node_count(start, end));
        if count < 2 {
            return Err(RopeError::TooFewNodes(count));
        }
        if count > MAX_NODES {
            log::warn!("refusing to build a {}-node rope", count);
            return Err(RopeError::TooManyNodes { count, max: MAX_NODES });
        }

        let distance = start.distance(end);
        let dir = if distance < epsilon() {
            Vec2::unit_x()
        } else {
            (end - start).normalize()
        };
        let spacing = match self.layout {
            NodeLayout::CompressStretch => distance / F::from_f32((count - 1) as f32),
            NodeLayout::FixedLength => self.config.segment_length,
        };

        let mut nodes = AllocVec::with_capacity(count);
        for i in 0..count {
            let offset = spacing * F::from_f32(i as f32);
            nodes.push(RopeNode::new(start + dir.scale(offset)));
        }

        if pin_start {
            nodes[0] = RopeNode::pinned(start);
        }
        if pin_end {
            nodes[count - 1] = RopeNode::pinned(end);
        }

        log::debug!(
            "built {}-node rope ({:?}), pin_start={} pin_end={}",
            count,
            self.layout,
            pin_start,
            pin_end
        );
        Ok(nodes)
    }

    /// Build a rope whose pinned ends are anchored at the build points and
    /// whose unpinned ends are detached.
    pub fn build_rope(
        &self,
        start: Vec2<F>,
        end: Vec2<F>,
        pin_start: bool,
        pin_end: bool,
    ) -> Result<Rope<F>, RopeError> {
        let nodes = self.build(start, end, pin_start, pin_end)?;
        let mut config = self.config;
        if self.fit_segment_length {
            let span = start.distance(end) * config.slack_factor;
            let fitted = span / F::from_f32((nodes.len() - 1) as f32);
            config.segment_length = fitted.max(epsilon());
        }
        let start_anchor = if pin_start { Anchor::at(start) } else { Anchor::detached() };
        let end_anchor = if pin_end { Anchor::at(end) } else { Anchor::detached() };
        Rope::from_nodes(nodes, config, start_anchor, end_anchor)
    }
}
