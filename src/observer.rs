//! Step observer trait for monitoring simulation progress.

use crate::collision::CollisionStats;

/// Summary of one frame's worth of substeps.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub substeps: usize,
    /// Summed over all substeps.
    pub collisions: CollisionStats,
    /// Link solves skipped because both endpoints coincided, summed over all substeps.
    pub degenerate_links: usize,
}

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after the particle set has been (re)seeded.
    fn on_reset(&mut self, _particles: usize, _links: usize) {}

    /// Called after the collision pass of a substep.
    fn on_collisions(&mut self, _substep: usize, _stats: &CollisionStats) {}

    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self, _substep: usize) {}

    /// Called after the link pass of a substep (only when links are enabled).
    fn on_links(&mut self, _substep: usize, _degenerate: usize) {}

    /// Called when every substep of a frame is complete.
    fn on_frame_complete(&mut self, _stats: &FrameStats) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards observations to the `log` facade at trace level.
pub struct LogObserver;

impl StepObserver for LogObserver {
    fn on_reset(&mut self, particles: usize, links: usize) {
        log::trace!("reset: {} particles, {} links", particles, links);
    }

    fn on_collisions(&mut self, substep: usize, stats: &CollisionStats) {
        log::trace!(
            "substep {}: {} candidates, {} contacts, {} degenerate",
            substep, stats.candidates, stats.contacts, stats.degenerate
        );
    }

    fn on_links(&mut self, substep: usize, degenerate: usize) {
        if degenerate > 0 {
            log::trace!("substep {}: skipped {} degenerate links", substep, degenerate);
        }
    }

    fn on_frame_complete(&mut self, stats: &FrameStats) {
        log::trace!(
            "frame: {} substeps, {} contacts, {} degenerate pairs, {} degenerate links",
            stats.substeps, stats.collisions.contacts, stats.collisions.degenerate, stats.degenerate_links
        );
    }
}
