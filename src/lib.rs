//! Verlet rope and cable simulation for games.
//!
//! `tether` simulates ropes as chains of point masses with implicit
//! velocity, relaxed toward a fixed segment length. On top of the core
//! step it provides anchors, tension queries, cutting, a winch and a force
//! bridge to an external rigid body.
//!
//! # Features
//!
//! - **Verlet ropes**: gravity, damping, speed clamp and substeps
//! - **Anchors**: pinned endpoints that follow externally moved points
//! - **Tension**: current/ideal/max length, tautness and warning state
//! - **Cutting**: tension-triggered or manual split into two ropes with recoil
//! - **Winch**: retract and release by reeling nodes onto the start anchor
//! - **Body bridge**: clamped spring-damper coupling to a `DynamicBody`
//! - **World**: handle-based owner with a fixed-step accumulator and events
//! - **Observable**: monitor rope steps via the `StepObserver` trait
//! - **`no_std` compatible**: only needs `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod node;
pub mod config;
pub mod error;
pub mod builder;
pub mod integrator;
pub mod constraint;
pub mod anchor;
pub mod length;
pub mod rope;
pub mod cutter;
pub mod winch;
pub mod bridge;
pub mod observer;
pub mod stepper;
pub mod world;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use node::RopeNode;
pub use config::RopeConfig;
pub use error::RopeError;
pub use builder::{NodeLayout, RopeBuilder, MAX_NODES};
pub use anchor::{Anchor, REEL_THRESHOLD};
pub use rope::Rope;
pub use cutter::{CutterConfig, RopeCutter};
pub use winch::{Winch, WinchConfig, WinchState};
pub use bridge::{apply_bridge_force, BridgeConfig, BridgeOutcome, DynamicBody, PointBody};
pub use observer::{CountingObserver, NoOpStepObserver, StepObserver};
pub use stepper::FixedStepper;
pub use world::{BridgeAttachment, DestroyReason, RopeEvent, RopeHandle, RopeWorld};
