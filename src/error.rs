//! Error types for rope construction and runtime commands.

use thiserror::Error;

/// Errors that can occur while building or operating on a rope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RopeError {
    /// A rope needs at least two nodes.
    #[error("rope needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),
    /// The node count exceeds what a builder will allocate.
    #[error("rope of {count} nodes exceeds the limit of {max}")]
    TooManyNodes { count: usize, max: usize },
    /// A configuration value is out of range.
    #[error("invalid rope configuration: {0}")]
    InvalidConfig(&'static str),
    /// Cut index must name an interior node.
    #[error("cut index {index} outside interior range of a {count}-node rope")]
    CutIndexOutOfRange { index: usize, count: usize },
    /// The rope is latched, too short, or has a loose end.
    #[error("rope is not eligible for cutting")]
    NotCuttable,
    /// A node position became NaN or infinite.
    #[error("node {index} has a non-finite position")]
    NonFinite { index: usize },
    /// The handle does not name a live rope.
    #[error("no rope with handle {0}")]
    UnknownRope(u64),
}
