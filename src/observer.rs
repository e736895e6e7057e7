//! Step observer trait for monitoring rope simulation progress.

/// Hooks called from inside a rope step.
///
/// Implement this to trace, visualize or profile the pipeline. All
/// methods default to no-ops.
pub trait StepObserver {
    /// Called after endpoints were synced to their anchors.
    fn on_anchor_sync(&mut self) {}

    /// Called after free nodes were integrated.
    fn on_integrate(&mut self) {}

    /// Called after each constraint sweep.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called once per rope when its full step (all substeps) is done.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Counts hook invocations. Handy in tests and quick profiling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingObserver {
    pub syncs: usize,
    pub integrations: usize,
    pub constraint_iterations: usize,
    pub steps: usize,
}

impl StepObserver for CountingObserver {
    fn on_anchor_sync(&mut self) {
        self.syncs += 1;
    }

    fn on_integrate(&mut self) {
        self.integrations += 1;
    }

    fn on_constraint_iteration(&mut self, _iteration: usize) {
        self.constraint_iterations += 1;
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
