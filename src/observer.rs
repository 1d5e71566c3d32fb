//! Step observer trait for monitoring physics simulation progress.

/// Trait for observing the stages of a world step.
///
/// Implement this trait to monitor the pipeline (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called before the forces of a sub-step are reset.
    fn on_sub_step_begin(&mut self, _sub_step: usize) {}

    /// Called once gravity and spring forces are accumulated on every point.
    fn on_forces_accumulated(&mut self) {}

    /// Called after every body has been integrated.
    fn on_integrate(&mut self) {}

    /// Called after the body-vs-body pass with the number of points pushed back.
    fn on_inter_body_contacts(&mut self, _count: usize) {}

    /// Called after the same-body pass with the number of separated pairs.
    fn on_intra_body_contacts(&mut self, _count: usize) {}

    /// Called after the bounding box pass with the number of clamped points.
    fn on_bounds_contacts(&mut self, _count: usize) {}

    /// Called when a sub-step has run every stage.
    fn on_sub_step_complete(&mut self, _sub_step: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
