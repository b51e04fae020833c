//! Host integration: frame-index driven reset and hand-off to a renderer.
//!
//! Hosts typically call back once per rendered frame with the current frame
//! number and the frame rate. `FrameDriver` turns "the frame counter is back
//! at its start value" into an explicit `Simulation::reset`, so the solver
//! itself never inspects frame numbers.

use crate::error::SimError;
use crate::float::Float;
use crate::observer::{FrameStats, StepObserver};
use crate::seed::{GridScene, Scene};
use crate::solver::Simulation;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Something that can display particle positions, e.g. a point mesh or one
/// instanced sphere per particle.
///
/// Implementations must be idempotent: creating the representation on the
/// first call and updating it in place afterwards.
pub trait Renderer<F: Float> {
    fn ensure_representation(&mut self, positions: &[Vec3<F>]);
}

/// Drives a [`Simulation`] from host frame callbacks.
pub struct FrameDriver<F: Float, S: Scene<F> = GridScene<F>> {
    sim: Simulation<F, S>,
    start_frame: i64,
}

impl<F: Float, S: Scene<F>> FrameDriver<F, S> {
    /// Reset whenever the host reports `start_frame`.
    pub fn new(sim: Simulation<F, S>, start_frame: i64) -> Self {
        FrameDriver { sim, start_frame }
    }

    /// Reseed if `frame_index` is the start frame, then advance one frame.
    pub fn on_frame<O: StepObserver>(
        &mut self,
        frame_index: i64,
        frame_rate: F,
        observer: &mut O,
    ) -> Result<FrameStats, SimError> {
        self.sim.config().substep_dt(frame_rate)?;
        if frame_index == self.start_frame {
            log::debug!("frame {} is the start frame, reseeding", frame_index);
            self.sim.reset()?;
            observer.on_reset(self.sim.particle_count(), self.sim.link_count());
        }
        self.sim.step_frame(frame_rate, observer)
    }

    /// Hand the current positions to `renderer`.
    pub fn render<R: Renderer<F>>(&self, renderer: &mut R) {
        renderer.ensure_representation(&self.sim.positions());
    }

    pub fn get_positions(&self) -> AllocVec<Vec3<F>> {
        self.sim.positions()
    }

    pub fn start_frame(&self) -> i64 { self.start_frame }
    pub fn simulation(&self) -> &Simulation<F, S> { &self.sim }
    pub fn simulation_mut(&mut self) -> &mut Simulation<F, S> { &mut self.sim }

    pub fn into_simulation(self) -> Simulation<F, S> {
        self.sim
    }
}
