//! Physics configuration handed to a rope at build time.

use crate::error::RopeError;
use crate::float::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physics parameters for one rope. Read-only for the life of the rope.
///
/// # Builder Pattern
/// ```
/// use tether::config::RopeConfig;
///
/// let config: RopeConfig<f32> = RopeConfig::new()
///     .with_segment_length(0.25)
///     .with_iterations(8)
///     .with_gravity(9.81)
///     .with_damping(0.99)
///     .with_substeps(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RopeConfig<F: Float> {
    /// Gravity magnitude, pulling toward -Y. Default: 9.81.
    pub gravity: F,
    /// Multiplier on implied velocity per tick, in (0, 1]. Default: 0.995.
    pub damping: F,
    /// Rest length of one link. Default: 0.2.
    pub segment_length: F,
    /// Relaxation sweeps per substep. Default: 6.
    pub constraint_iterations: usize,
    /// Extra rope spawned per unit of anchor distance when the node count
    /// is derived. Default: 1.0.
    pub slack_factor: F,
    /// Ratio over ideal length that defines the maximum length. Default: 1.3.
    pub max_stretch_factor: F,
    /// Substeps per tick. Never less than 1. Default: 1.
    pub substeps: usize,
    /// Per-second cap on node speed. Default: 200.
    pub max_speed: Option<F>,
    /// Current length must exceed `ideal * taut_hysteresis` to count as taut.
    /// Default: 1.0.
    pub taut_hysteresis: F,
    /// Fraction of max length at which the rope signals a warning. Default: 0.8.
    pub warning_ratio: F,
}

impl<F: Float> RopeConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        RopeConfig {
            gravity: F::from_f32(9.81),
            damping: F::from_f32(0.995),
            segment_length: F::from_f32(0.2),
            constraint_iterations: 6,
            slack_factor: F::one(),
            max_stretch_factor: F::from_f32(1.3),
            substeps: 1,
            max_speed: Some(F::from_f32(200.0)),
            taut_hysteresis: F::one(),
            warning_ratio: F::from_f32(0.8),
        }
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_segment_length(mut self, segment_length: F) -> Self {
        self.segment_length = segment_length;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    pub fn with_slack_factor(mut self, slack_factor: F) -> Self {
        self.slack_factor = slack_factor;
        self
    }

    pub fn with_max_stretch_factor(mut self, factor: F) -> Self {
        self.max_stretch_factor = factor;
        self
    }

    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.substeps = substeps.max(1);
        self
    }

    pub fn with_max_speed(mut self, max_speed: Option<F>) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_taut_hysteresis(mut self, hysteresis: F) -> Self {
        self.taut_hysteresis = hysteresis;
        self
    }

    pub fn with_warning_ratio(mut self, ratio: F) -> Self {
        self.warning_ratio = ratio;
        self
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), RopeError> {
        let all_finite = [
            self.gravity,
            self.damping,
            self.segment_length,
            self.slack_factor,
            self.max_stretch_factor,
            self.taut_hysteresis,
            self.warning_ratio,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(RopeError::InvalidConfig("non-finite parameter"));
        }
        if self.segment_length <= F::zero() {
            return Err(RopeError::InvalidConfig("segment_length must be positive"));
        }
        if self.damping <= F::zero() || self.damping > F::one() {
            return Err(RopeError::InvalidConfig("damping must be in (0, 1]"));
        }
        if self.slack_factor <= F::zero() {
            return Err(RopeError::InvalidConfig("slack_factor must be positive"));
        }
        if self.max_stretch_factor < F::one() {
            return Err(RopeError::InvalidConfig("max_stretch_factor must be at least 1"));
        }
        if self.substeps == 0 {
            return Err(RopeError::InvalidConfig("substeps must be at least 1"));
        }
        if let Some(speed) = self.max_speed {
            if !speed.is_finite() || speed <= F::zero() {
                return Err(RopeError::InvalidConfig("max_speed must be positive"));
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RopeConfig::<f32>::default().validate().is_ok());
    }

    #[test]
    fn substeps_never_zero() {
        let c: RopeConfig<f32> = RopeConfig::new().with_substeps(0);
        assert_eq!(c.substeps, 1);
    }

    #[test]
    fn rejects_non_positive_segment() {
        let c: RopeConfig<f64> = RopeConfig::new().with_segment_length(0.0);
        assert_eq!(
            c.validate(),
            Err(RopeError::InvalidConfig("segment_length must be positive"))
        );
    }

    #[test]
    fn rejects_nan() {
        let c: RopeConfig<f32> = RopeConfig::new().with_gravity(f32::NAN);
        assert!(c.validate().is_err());
    }
}
