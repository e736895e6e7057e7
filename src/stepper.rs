//! Fixed-timestep accumulator.

use crate::float::Float;

/// Turns variable frame times into a bounded number of fixed ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStepper<F: Float> {
    fixed_step: F,
    max_steps_per_update: usize,
    accumulator: F,
}

impl<F: Float> FixedStepper<F> {
    /// `fixed_step` must be positive; `max_steps_per_update` is at least 1.
    pub fn new(fixed_step: F, max_steps_per_update: usize) -> Self {
        FixedStepper {
            fixed_step,
            max_steps_per_update: max_steps_per_update.max(1),
            accumulator: F::zero(),
        }
    }

    pub fn fixed_step(&self) -> F {
        self.fixed_step
    }

    pub fn accumulator(&self) -> F {
        self.accumulator
    }

    /// Add `frame_dt` and return how many fixed ticks to run now.
    ///
    /// When the cap is hit the backlog is dropped down to less than one
    /// step, so a long stall never turns into a burst of catch-up ticks.
    pub fn advance(&mut self, frame_dt: F) -> usize {
        if self.fixed_step <= F::zero() || !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator = self.accumulator + frame_dt.max(F::zero());
        let mut steps = 0;
        while self.accumulator >= self.fixed_step && steps < self.max_steps_per_update {
            self.accumulator = self.accumulator - self.fixed_step;
            steps += 1;
        }
        if steps == self.max_steps_per_update && self.accumulator >= self.fixed_step {
            log::debug!("fixed stepper dropped {:?}s of backlog", self.accumulator);
            self.accumulator = F::zero();
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = F::zero();
    }
}

impl<F: Float> Default for FixedStepper<F> {
    fn default() -> Self {
        Self::new(F::from_f32(0.02), 4)
    }
}
