//! Tension-triggered and manual rope cutting.

use crate::anchor::Anchor;
use crate::error::RopeError;
use crate::float::Float;
use crate::node::RopeNode;
use crate::rope::Rope;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning for automatic cuts and the recoil applied to the fragments.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CutterConfig<F: Float> {
    /// Stretch ratio (`current / max`) at which an automatic cut fires.
    pub stretch_threshold: F,
    /// Fractional position of the weak point among free interior nodes.
    pub weak_ratio: F,
    pub recoil_strength: F,
    /// Multiplier turning `recoil_strength` into a per-tick displacement.
    pub recoil_scale: F,
    /// Nodes on each side of the cut that receive recoil.
    pub recoil_nodes: usize,
}

impl<F: Float> Default for CutterConfig<F> {
    fn default() -> Self {
        CutterConfig {
            stretch_threshold: F::from_f32(0.94),
            weak_ratio: F::from_f32(0.45),
            recoil_strength: F::from_f32(1.5),
            recoil_scale: F::from_f32(0.1),
            recoil_nodes: usize::MAX,
        }
    }
}

/// Watches one rope and cuts it at most once.
///
/// The latch makes cutting terminal for the rope instance it is attached
/// to: after a cut (automatic or manual) this cutter never fires again.
#[derive(Clone, Debug)]
pub struct RopeCutter<F: Float> {
    config: CutterConfig<F>,
    has_cut: bool,
}

impl<F: Float> RopeCutter<F> {
    pub fn new(config: CutterConfig<F>) -> Self {
        RopeCutter { config, has_cut: false }
    }

    pub fn config(&self) -> &CutterConfig<F> {
        &self.config
    }

    pub fn has_cut(&self) -> bool {
        self.has_cut
    }

    /// At least three nodes and both ends pinned. A rope with a loose end
    /// is never cut.
    pub fn can_be_cut(rope: &Rope<F>) -> bool {
        rope.len() >= 3 && rope.both_ends_pinned()
    }

    /// Free interior node nearest `weak_ratio` along the list of free
    /// interior nodes.
    pub fn recommended_cut_index(&self, rope: &Rope<F>) -> Option<usize> {
        let n = rope.len();
        let free: AllocVec<usize> = (1..n.saturating_sub(1))
            .filter(|&i| !rope.node(i).pinned)
            .collect();
        if free.is_empty() {
            return None;
        }
        let slot = (F::from_f32(free.len() as f32) * self.config.weak_ratio).to_f32();
        let slot = if slot.is_finite() && slot > 0.0 { round_half_even(slot) as usize } else { 0 };
        Some(free[slot.min(free.len() - 1)])
    }

    /// Decide whether this tick cuts the rope. Latches on success.
    pub fn try_auto_cut(&mut self, rope: &Rope<F>) -> Option<usize> {
        if self.has_cut || !Self::can_be_cut(rope) {
            return None;
        }
        if rope.stretch_ratio() < self.config.stretch_threshold {
            return None;
        }
        let index = self.recommended_cut_index(rope)?;
        self.has_cut = true;
        log::debug!(
            "auto-cut at node {} (stretch ratio {:?})",
            index,
            rope.stretch_ratio()
        );
        Some(index)
    }

    /// Cut on request, subject to the same latch and eligibility as
    /// automatic cuts.
    pub fn cut_manually(&mut self, rope: &Rope<F>, index: usize) -> Result<(Rope<F>, Rope<F>), RopeError> {
        if self.has_cut || !Self::can_be_cut(rope) {
            log::warn!("manual cut at {} rejected: rope not cuttable", index);
            return Err(RopeError::NotCuttable);
        }
        let pieces = self.cut_at(rope, index)?;
        self.has_cut = true;
        Ok(pieces)
    }

    /// Split `rope` at interior node `index` into two independent ropes.
    ///
    /// Left is `[0..=index]`, right is `[index..]`; the cut node is
    /// duplicated and becomes the free end of both. Recoil is given as a
    /// velocity, so at cut time both free ends share the same position.
    pub fn cut_at(&self, rope: &Rope<F>, index: usize) -> Result<(Rope<F>, Rope<F>), RopeError> {
        let count = rope.len();
        if index == 0 || index >= count - 1 {
            log::warn!("cut index {} outside interior of {}-node rope", index, count);
            return Err(RopeError::CutIndexOutOfRange { index, count });
        }
        let nodes = rope.nodes();
        let cut_pos = nodes[index].pos;

        let mut left: AllocVec<RopeNode<F>> = nodes[..=index].to_vec();
        let mut right: AllocVec<RopeNode<F>> = nodes[index..].to_vec();
        let left_end = left.len() - 1;
        left[left_end].pos = cut_pos;
        left[left_end].unpin();
        right[0].pos = cut_pos;
        right[0].unpin();

        let tangent = (nodes[index + 1].pos - nodes[index - 1].pos).normalize();
        if tangent != Vec2::zero() {
            let recoil = tangent.scale(self.config.recoil_strength * self.config.recoil_scale);
            apply_recoil(left.iter_mut().rev(), -recoil, self.config.recoil_nodes);
            apply_recoil(right.iter_mut(), recoil, self.config.recoil_nodes);
        }

        let config = *rope.config();
        let mut left_rope = Rope::from_nodes(left, config, *rope.start_anchor(), Anchor::detached())?;
        let mut right_rope = Rope::from_nodes(right, config, Anchor::detached(), *rope.end_anchor())?;
        left_rope.set_simulating(rope.is_simulating());
        right_rope.set_simulating(rope.is_simulating());

        log::debug!(
            "cut {}-node rope at {} into {} + {}",
            count,
            index,
            left_rope.len(),
            right_rope.len()
        );
        Ok((left_rope, right_rope))
    }
}

/// Ties go to the even neighbour, so 4.5 picks slot 4.
fn round_half_even(x: f32) -> f32 {
    let r = Float::round(x);
    if r - x == 0.5 && (r as usize) % 2 == 1 {
        r - 1.0
    } else {
        r
    }
}

/// Push nodes ordered outward from the cut, with linear falloff.
fn apply_recoil<'a, F, I>(nodes: I, recoil: Vec2<F>, limit: usize)
where
    F: Float + 'a,
    I: ExactSizeIterator<Item = &'a mut RopeNode<F>>,
{
    let count = nodes.len().min(limit);
    if count == 0 {
        return;
    }
    let count_f = F::from_f32(count as f32);
    for (i, node) in nodes.take(count).enumerate() {
        let falloff = F::one() - F::from_f32(i as f32) / count_f;
        node.push(recoil.scale(falloff));
    }
}
