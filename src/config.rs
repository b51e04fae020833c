//! Configuration types for the simulation.

use crate::error::SimError;
use crate::float::Float;
use crate::integrator::GravityMode;
use crate::vec::{Vec, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Link construction and relaxation settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig<F: Float> {
    /// Build links after seeding and relax them every substep. Default: true.
    pub enabled: bool,
    /// Fraction of the correction applied per solve, in (0, 1]. Default: 0.95.
    pub stiffness: F,
    /// Particles closer than `distance_factor * particle_radius` are linked.
    /// Default: 4.0.
    pub distance_factor: F,
}

impl<F: Float> Default for LinkConfig<F> {
    fn default() -> Self {
        LinkConfig {
            enabled: true,
            stiffness: F::from_f32(0.95),
            distance_factor: F::from_f32(4.0),
        }
    }
}

/// Configuration for the solver and stepping loop.
///
/// # Builder Pattern
/// ```
/// use granule::config::SimConfig;
/// use granule::vec::Vec3;
///
/// let config: SimConfig<f32> = SimConfig::new()
///     .with_substeps(8)
///     .with_gravity(Vec3::new(0.0, 0.0, -9.81))
///     .with_particle_radius(0.05)
///     .with_link_stiffness(1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimConfig<F: Float> {
    /// Number of substeps per frame. Default: 16.
    pub substeps: usize,
    /// Gravity acceleration; `z` is up. Default: (0, 0, -9.81).
    pub gravity: Vec3<F>,
    /// How gravity enters each particle's acceleration. Default: constant.
    pub gravity_mode: GravityMode,
    /// Radius given to seeded particles. Default: 0.05.
    pub particle_radius: F,
    pub links: LinkConfig<F>,
}

impl<F: Float> SimConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimConfig {
            substeps: 16,
            gravity: Vec3::from_f32(0.0, 0.0, -9.81),
            gravity_mode: GravityMode::Constant,
            particle_radius: F::from_f32(0.05),
            links: LinkConfig::default(),
        }
    }

    /// Set the number of substeps per frame. Zero is rejected by `validate`.
    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = mode;
        self
    }

    pub fn with_particle_radius(mut self, radius: F) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn with_links(mut self, links: LinkConfig<F>) -> Self {
        self.links = links;
        self
    }

    pub fn with_link_stiffness(mut self, stiffness: F) -> Self {
        self.links.stiffness = stiffness;
        self
    }

    pub fn without_links(mut self) -> Self {
        self.links.enabled = false;
        self
    }

    /// Reject configurations that would divide by zero or produce NaNs.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.substeps == 0 {
            return Err(SimError::ZeroSubsteps);
        }
        if !self.particle_radius.is_positive_finite() {
            return Err(SimError::InvalidRadius);
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidGravity);
        }
        if self.links.enabled {
            let stiffness = self.links.stiffness;
            if !stiffness.is_positive_finite() || stiffness > F::one() {
                return Err(SimError::InvalidStiffness);
            }
            if !self.link_distance().is_positive_finite() {
                return Err(SimError::InvalidLinkDistance);
            }
        }
        Ok(())
    }

    /// Substep length for a frame rate: `1 / frame_rate / substeps`.
    pub fn substep_dt(&self, frame_rate: F) -> Result<F, SimError> {
        if !frame_rate.is_positive_finite() {
            return Err(SimError::InvalidFrameRate);
        }
        if self.substeps == 0 {
            return Err(SimError::ZeroSubsteps);
        }
        Ok(F::one() / frame_rate / F::from_usize(self.substeps))
    }

    /// Distance below which seeded particles get linked.
    pub fn link_distance(&self) -> F {
        self.links.distance_factor * self.particle_radius
    }
}

impl<F: Float> Default for SimConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
