//! The simulation context and its fixed-substep stepping loop.

use crate::collision::CollisionResolver;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::integrator::Integrator;
use crate::link::{build_links, solve_links, Link};
use crate::observer::{FrameStats, StepObserver};
use crate::particle::Particle;
use crate::seed::{GridScene, Scene};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Lifecycle of a simulation run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimState {
    /// No particles yet; the next frame (or `reset`) seeds the scene.
    Uninitialized,
    Running,
}

/// Owns the particle set, links and solver scratch state for one run.
///
/// Each substep runs, in this order: collision resolution against a freshly
/// rebuilt spatial index, Verlet integration, then one relaxation pass over
/// the links.
pub struct Simulation<F: Float, S: Scene<F> = GridScene<F>> {
    config: SimConfig<F>,
    scene: S,
    integrator: Integrator<F>,
    resolver: CollisionResolver<F>,
    particles: AllocVec<Particle<F>>,
    links: AllocVec<Link<F>>,
    state: SimState,
}

impl<F: Float> Simulation<F> {
    /// A simulation of the default scene.
    pub fn with_defaults(config: SimConfig<F>) -> Result<Self, SimError> {
        Simulation::new(config, GridScene::default())
    }
}

impl<F: Float, S: Scene<F>> Simulation<F, S> {
    pub fn new(config: SimConfig<F>, scene: S) -> Result<Self, SimError> {
        config.validate()?;
        scene.validate()?;
        Ok(Simulation {
            integrator: Integrator::new(config.gravity, config.gravity_mode),
            config,
            scene,
            resolver: CollisionResolver::new(),
            particles: AllocVec::new(),
            links: AllocVec::new(),
            state: SimState::Uninitialized,
        })
    }

    /// Discard all state, reseed from the scene and rebuild links.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.particles.clear();
        self.links.clear();
        self.state = SimState::Uninitialized;

        self.scene.populate(&self.config, &mut self.particles);
        if self.particles.iter().any(|p| !p.radius.is_positive_finite()) {
            self.particles.clear();
            return Err(SimError::InvalidRadius);
        }

        if self.config.links.enabled {
            self.links = build_links(
                &self.particles,
                self.config.link_distance(),
                self.config.links.stiffness,
            )?;
        }

        self.state = SimState::Running;
        log::debug!(
            "seeded {} particles ({} static), {} links",
            self.particles.len(),
            self.particles.iter().filter(|p| p.is_static).count(),
            self.links.len()
        );
        Ok(())
    }

    /// Advance one frame: `config.substeps` substeps of `1 / frame_rate / substeps`.
    ///
    /// Seeds the scene first if the simulation is still uninitialized. An
    /// invalid frame rate is rejected before anything is touched.
    pub fn step_frame<O: StepObserver>(
        &mut self,
        frame_rate: F,
        observer: &mut O,
    ) -> Result<FrameStats, SimError> {
        let dt = self.config.substep_dt(frame_rate)?;
        if self.state == SimState::Uninitialized {
            self.reset()?;
            observer.on_reset(self.particles.len(), self.links.len());
        }

        let mut stats = FrameStats::default();
        for sub in 0..self.config.substeps {
            self.run_substep(sub, dt, observer, &mut stats);
        }

        log::trace!(
            "frame done: {} substeps, {} contacts",
            stats.substeps,
            stats.collisions.contacts
        );
        observer.on_frame_complete(&stats);
        Ok(stats)
    }

    /// Run a single substep of length `dt`. Does nothing before the first reset.
    pub fn substep<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> FrameStats {
        let mut stats = FrameStats::default();
        if self.state == SimState::Running {
            self.run_substep(0, dt, observer, &mut stats);
        }
        stats
    }

    fn run_substep<O: StepObserver>(
        &mut self,
        sub: usize,
        dt: F,
        observer: &mut O,
        stats: &mut FrameStats,
    ) {
        let collisions = self.resolver.resolve(&mut self.particles);
        observer.on_collisions(sub, &collisions);
        stats.collisions.accumulate(&collisions);

        self.integrator.step(&mut self.particles, dt);
        observer.on_integrate(sub);

        if self.config.links.enabled {
            let degenerate = solve_links(&self.links, &mut self.particles);
            observer.on_links(sub, degenerate);
            stats.degenerate_links += degenerate;
        }

        stats.substeps += 1;
    }

    /// Current particle positions in stable particle order.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn links(&self) -> &[Link<F>] { &self.links }
    pub fn config(&self) -> &SimConfig<F> { &self.config }
    pub fn scene(&self) -> &S { &self.scene }
    pub fn state(&self) -> SimState { self.state }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn link_count(&self) -> usize { self.links.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;
    use alloc::vec;

    #[test]
    fn starts_uninitialized_and_seeds_on_first_frame() {
        let mut sim = Simulation::<f32>::with_defaults(SimConfig::new()).unwrap();
        assert_eq!(sim.state(), SimState::Uninitialized);
        assert!(sim.positions().is_empty());

        let stats = sim.step_frame(24.0, &mut NoOpStepObserver).unwrap();
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(stats.substeps, 16);
        assert_eq!(sim.particle_count(), 326);
        assert!(sim.link_count() > 0);
    }

    #[test]
    fn invalid_frame_rate_leaves_state_untouched() {
        let mut sim = Simulation::<f32>::with_defaults(SimConfig::new()).unwrap();
        assert_eq!(sim.step_frame(0.0, &mut NoOpStepObserver), Err(SimError::InvalidFrameRate));
        assert_eq!(sim.state(), SimState::Uninitialized);
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = SimConfig::<f32>::new().with_substeps(0);
        assert!(matches!(Simulation::with_defaults(config), Err(SimError::ZeroSubsteps)));
    }

    #[test]
    fn scene_radius_validated_on_reset() {
        let scene = vec![Particle::new(Vec3::new(0.0f32, 0.0, 0.0), -1.0)];
        let mut sim = Simulation::new(SimConfig::new(), scene).unwrap();
        assert_eq!(sim.reset(), Err(SimError::InvalidRadius));
        assert_eq!(sim.state(), SimState::Uninitialized);
        assert_eq!(sim.particle_count(), 0);
    }

    #[test]
    fn reset_seeds_what_the_scene_describes() {
        let mut sim = Simulation::<f64>::with_defaults(SimConfig::new()).unwrap();
        sim.reset().unwrap();
        assert_eq!(sim.particle_count(), sim.scene().particle_count());
        assert_eq!(sim.particles()[125].pos, sim.scene().anchors[0]);
    }

    #[test]
    fn links_disabled_builds_none() {
        let mut sim = Simulation::<f32>::with_defaults(SimConfig::new().without_links()).unwrap();
        sim.reset().unwrap();
        assert_eq!(sim.link_count(), 0);
    }

    #[test]
    fn substep_before_reset_is_noop() {
        let mut sim = Simulation::<f32>::with_defaults(SimConfig::new()).unwrap();
        let stats = sim.substep(0.001, &mut NoOpStepObserver);
        assert_eq!(stats.substeps, 0);
    }
}
