//! Simulation owner: holds every live rope and its modules, runs the
//! per-tick pipeline and reports lifecycle events.

use crate::anchor::Anchor;
use crate::bridge::{apply_bridge_force, BridgeConfig, DynamicBody, PointBody};
use crate::cutter::{CutterConfig, RopeCutter};
use crate::error::RopeError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::rope::Rope;
use crate::stepper::FixedStepper;
use crate::vec::Vec2;
use crate::winch::{Winch, WinchConfig};
use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;
use core::fmt;

/// Stable identifier of a rope inside a [`RopeWorld`]. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RopeHandle(u64);

impl RopeHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rope#{}", self.0)
    }
}

/// Couples the rope's last node to `bodies[body]` passed to [`RopeWorld::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BridgeAttachment<F: Float> {
    pub body: usize,
    pub config: BridgeConfig<F>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyReason {
    /// Replaced by two children after a cut.
    Split,
    /// A node position became NaN or infinite.
    NonFinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RopeEvent {
    /// `parent` was cut; `left` holds the start side, `right` the end side.
    Split { parent: RopeHandle, left: RopeHandle, right: RopeHandle },
    /// The rope is gone; drop any render references to it.
    Destroyed { handle: RopeHandle, reason: DestroyReason },
}

#[derive(Clone, Debug)]
struct RopeSlot<F: Float> {
    rope: Rope<F>,
    cutter: Option<RopeCutter<F>>,
    winch: Option<Winch<F>>,
    bridge: Option<BridgeAttachment<F>>,
}

/// Owns ropes and their optional cutter, winch and bridge.
///
/// Ropes are processed in handle order, so a run is deterministic.
#[derive(Clone, Debug)]
pub struct RopeWorld<F: Float> {
    slots: BTreeMap<RopeHandle, RopeSlot<F>>,
    next_id: u64,
    stepper: FixedStepper<F>,
    pending: AllocVec<RopeEvent>,
}

impl<F: Float> RopeWorld<F> {
    pub fn new() -> Self {
        RopeWorld {
            slots: BTreeMap::new(),
            next_id: 1,
            stepper: FixedStepper::default(),
            pending: AllocVec::new(),
        }
    }

    pub fn with_stepper(mut self, stepper: FixedStepper<F>) -> Self {
        self.stepper = stepper;
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, handle: RopeHandle) -> bool {
        self.slots.contains_key(&handle)
    }

    pub fn handles(&self) -> impl Iterator<Item = RopeHandle> + '_ {
        self.slots.keys().copied()
    }

    pub fn spawn(&mut self, rope: Rope<F>) -> RopeHandle {
        let handle = self.insert(RopeSlot { rope, cutter: None, winch: None, bridge: None });
        log::debug!("spawned {}", handle);
        handle
    }

    /// Remove a rope and hand it back.
    pub fn despawn(&mut self, handle: RopeHandle) -> Option<Rope<F>> {
        let slot = self.slots.remove(&handle)?;
        log::debug!("despawned {}", handle);
        Some(slot.rope)
    }

    pub fn rope(&self, handle: RopeHandle) -> Option<&Rope<F>> {
        self.slots.get(&handle).map(|s| &s.rope)
    }

    pub fn rope_mut(&mut self, handle: RopeHandle) -> Option<&mut Rope<F>> {
        self.slots.get_mut(&handle).map(|s| &mut s.rope)
    }

    pub fn cutter(&self, handle: RopeHandle) -> Option<&RopeCutter<F>> {
        self.slots.get(&handle)?.cutter.as_ref()
    }

    pub fn winch(&self, handle: RopeHandle) -> Option<&Winch<F>> {
        self.slots.get(&handle)?.winch.as_ref()
    }

    pub fn winch_mut(&mut self, handle: RopeHandle) -> Option<&mut Winch<F>> {
        self.slots.get_mut(&handle)?.winch.as_mut()
    }

    pub fn bridge(&self, handle: RopeHandle) -> Option<&BridgeAttachment<F>> {
        self.slots.get(&handle)?.bridge.as_ref()
    }

    pub fn attach_cutter(&mut self, handle: RopeHandle, config: CutterConfig<F>) -> Result<(), RopeError> {
        self.slot_mut(handle)?.cutter = Some(RopeCutter::new(config));
        Ok(())
    }

    pub fn attach_winch(&mut self, handle: RopeHandle, config: WinchConfig<F>) -> Result<(), RopeError> {
        self.slot_mut(handle)?.winch = Some(Winch::new(config));
        Ok(())
    }

    /// Drive the rope's end through a force bridge to `bodies[body]`.
    ///
    /// The end anchor is unbound and the last node unpinned, since a
    /// bridged end is never hard-pinned.
    pub fn attach_bridge(
        &mut self,
        handle: RopeHandle,
        body: usize,
        config: BridgeConfig<F>,
    ) -> Result<(), RopeError> {
        let slot = self.slot_mut(handle)?;
        slot.rope.set_end_anchor(Anchor::unbound());
        let last = slot.rope.len() - 1;
        slot.rope.nodes_mut()[last].unpin();
        slot.bridge = Some(BridgeAttachment { body, config });
        Ok(())
    }

    /// Set anchor positions for the next tick. `None` leaves an end as is.
    pub fn move_anchors(
        &mut self,
        handle: RopeHandle,
        start: Option<Vec2<F>>,
        end: Option<Vec2<F>>,
    ) -> Result<(), RopeError> {
        self.slot_mut(handle)?.rope.move_anchors(start, end);
        Ok(())
    }

    pub fn start_retract(&mut self, handle: RopeHandle) -> Result<(), RopeError> {
        self.with_winch(handle, "start_retract", Winch::start_retract)
    }

    pub fn stop_retract(&mut self, handle: RopeHandle) -> Result<(), RopeError> {
        self.with_winch(handle, "stop_retract", Winch::stop_retract)
    }

    pub fn start_release(&mut self, handle: RopeHandle) -> Result<(), RopeError> {
        self.with_winch(handle, "start_release", Winch::start_release)
    }

    pub fn stop_release(&mut self, handle: RopeHandle) -> Result<(), RopeError> {
        self.with_winch(handle, "stop_release", Winch::stop_release)
    }

    /// Manually cut a rope at `index`. Honours the rope's cutter latch when
    /// one is attached. The split is reported by the next [`RopeWorld::tick`].
    pub fn cut(&mut self, handle: RopeHandle, index: usize) -> Result<(RopeHandle, RopeHandle), RopeError> {
        let slot = self.slot_mut(handle)?;
        let pieces = match slot.cutter.as_mut() {
            Some(cutter) => cutter.cut_manually(&slot.rope, index)?,
            None => RopeCutter::new(CutterConfig::default()).cut_manually(&slot.rope, index)?,
        };
        let mut events = core::mem::take(&mut self.pending);
        let children = self.replace_with_children(handle, pieces, &mut events);
        self.pending = events;
        Ok(children)
    }

    /// Run one fixed tick for ropes that have no bridge bodies.
    pub fn tick_without_bodies<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> AllocVec<RopeEvent> {
        self.tick::<PointBody<F>, O>(dt, &mut [], observer)
    }

    /// Run one fixed tick over every rope.
    ///
    /// Per rope: anchor sync, integration and relaxation, then the winch,
    /// then the cutter. Splits are applied once all ropes have stepped, and
    /// bridge forces go last. Ropes that became non-finite are destroyed.
    /// The caller integrates `bodies` afterwards.
    pub fn tick<B: DynamicBody<F>, O: StepObserver>(
        &mut self,
        dt: F,
        bodies: &mut [B],
        observer: &mut O,
    ) -> AllocVec<RopeEvent> {
        let mut events = core::mem::take(&mut self.pending);
        let mut splits = AllocVec::new();
        let mut broken = AllocVec::new();

        for (&handle, slot) in self.slots.iter_mut() {
            if let Err(err) = slot.rope.step(dt, observer) {
                log::error!("{} destroyed: {}", handle, err);
                broken.push(handle);
                continue;
            }
            if !slot.rope.is_simulating() {
                continue;
            }
            if let Some(winch) = slot.winch.as_mut() {
                winch.update(&mut slot.rope, dt);
            }
            if let Some(cutter) = slot.cutter.as_mut() {
                if let Some(index) = cutter.try_auto_cut(&slot.rope) {
                    match cutter.cut_at(&slot.rope, index) {
                        Ok(pieces) => splits.push((handle, pieces)),
                        Err(err) => log::warn!("{} auto-cut abandoned: {}", handle, err),
                    }
                }
            }
        }

        for handle in broken {
            self.slots.remove(&handle);
            events.push(RopeEvent::Destroyed { handle, reason: DestroyReason::NonFinite });
        }
        for (handle, pieces) in splits {
            self.replace_with_children(handle, pieces, &mut events);
        }

        for (&handle, slot) in self.slots.iter_mut() {
            let Some(attachment) = slot.bridge else { continue };
            if !slot.rope.is_simulating() {
                continue;
            }
            let Some(body) = bodies.get_mut(attachment.body) else {
                log::warn!("{} bridged to missing body {}", handle, attachment.body);
                continue;
            };
            let last = slot.rope.len() - 1;
            apply_bridge_force(&mut slot.rope.nodes_mut()[last], body, &attachment.config);
        }

        log::trace!("tick over {} ropes, {} events", self.slots.len(), events.len());
        events
    }

    /// Feed a frame time through the fixed stepper and run the due ticks.
    pub fn update<B: DynamicBody<F>, O: StepObserver>(
        &mut self,
        frame_dt: F,
        bodies: &mut [B],
        observer: &mut O,
    ) -> AllocVec<RopeEvent> {
        let steps = self.stepper.advance(frame_dt);
        let fixed = self.stepper.fixed_step();
        let mut events = AllocVec::new();
        for _ in 0..steps {
            events.extend(self.tick(fixed, bodies, observer));
        }
        events
    }

    fn insert(&mut self, slot: RopeSlot<F>) -> RopeHandle {
        let handle = RopeHandle(self.next_id);
        self.next_id += 1;
        self.slots.insert(handle, slot);
        handle
    }

    fn slot_mut(&mut self, handle: RopeHandle) -> Result<&mut RopeSlot<F>, RopeError> {
        self.slots
            .get_mut(&handle)
            .ok_or(RopeError::UnknownRope(handle.id()))
    }

    fn with_winch(
        &mut self,
        handle: RopeHandle,
        command: &str,
        apply: fn(&mut Winch<F>),
    ) -> Result<(), RopeError> {
        match self.slot_mut(handle)?.winch.as_mut() {
            Some(winch) => apply(winch),
            None => log::warn!("{} ignored on {}: no winch attached", command, handle),
        }
        Ok(())
    }

    /// Left child keeps the winch, right child keeps the bridge, both get a
    /// fresh cutter with the parent's tuning.
    fn replace_with_children(
        &mut self,
        parent: RopeHandle,
        (left, right): (Rope<F>, Rope<F>),
        events: &mut AllocVec<RopeEvent>,
    ) -> (RopeHandle, RopeHandle) {
        let old = self.slots.remove(&parent);
        let cutter_config = old.as_ref().and_then(|s| s.cutter.as_ref()).map(|c| *c.config());
        let (winch, bridge) = match old {
            Some(slot) => (slot.winch, slot.bridge),
            None => (None, None),
        };

        let left_handle = self.insert(RopeSlot {
            rope: left,
            cutter: cutter_config.map(RopeCutter::new),
            winch,
            bridge: None,
        });
        let right_handle = self.insert(RopeSlot {
            rope: right,
            cutter: cutter_config.map(RopeCutter::new),
            winch: None,
            bridge,
        });

        log::debug!("{} split into {} and {}", parent, left_handle, right_handle);
        events.push(RopeEvent::Split { parent, left: left_handle, right: right_handle });
        events.push(RopeEvent::Destroyed { handle: parent, reason: DestroyReason::Split });
        (left_handle, right_handle)
    }
}

impl<F: Float> Default for RopeWorld<F> {
    fn default() -> Self {
        Self::new()
    }
}
