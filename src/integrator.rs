//! Verlet integration of the whole particle set under gravity.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Vec, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How gravity enters the per-substep acceleration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GravityMode {
    /// Gravity is added to each particle's stored acceleration on every
    /// substep without modifying it. Motion is a plain parabola.
    #[default]
    Constant,
    /// Gravity is accumulated into each particle's stored acceleration on
    /// every substep and never reset, so particles fall ever faster across
    /// substeps and frames. Together with `BlockConfig::classic`, which seeds
    /// a stored acceleration of (0, 0, -1), this reproduces the classic
    /// drifting behaviour.
    Accumulate,
}

/// Advances every non-static particle by one substep.
#[derive(Copy, Clone, Debug)]
pub struct Integrator<F: Float> {
    pub gravity: Vec3<F>,
    pub mode: GravityMode,
}

impl<F: Float> Integrator<F> {
    pub fn new(gravity: Vec3<F>, mode: GravityMode) -> Self {
        Integrator { gravity, mode }
    }

    pub fn step(&self, particles: &mut [Particle<F>], dt: F) {
        match self.mode {
            GravityMode::Constant => {
                for p in particles.iter_mut() {
                    p.integrate(dt, self.gravity);
                }
            }
            GravityMode::Accumulate => {
                for p in particles.iter_mut().filter(|p| !p.is_static) {
                    p.acceleration = p.acceleration + self.gravity;
                    p.integrate(dt, Vec3::zero());
                }
            }
        }
    }
}
