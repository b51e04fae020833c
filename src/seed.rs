//! Scene seeding: the initial particle set for a simulation run.

use crate::config::SimConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Vec, Vec3};
use alloc::vec;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Produces the particles a run starts from. Called on every reset, so it
/// must be deterministic for resets to be repeatable.
pub trait Scene<F: Float> {
    /// Append the initial particles to `particles` (which arrives empty).
    fn populate(&self, config: &SimConfig<F>, particles: &mut AllocVec<Particle<F>>);

    /// Check scene parameters before the first reset.
    fn validate(&self) -> Result<(), SimError> {
        Ok(())
    }
}

/// An explicit particle list is its own scene.
impl<F: Float> Scene<F> for AllocVec<Particle<F>> {
    fn populate(&self, _config: &SimConfig<F>, particles: &mut AllocVec<Particle<F>>) {
        particles.extend_from_slice(self);
    }
}

/// A box of dynamic particles laid out on a cubic lattice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockConfig<F: Float> {
    /// Particle counts along x, y, z. Default: 5×5×5.
    pub dims: [usize; 3],
    /// Lattice spacing. Default: 0.1.
    pub spacing: F,
    /// The block is centred on `origin` in x and y and rises from `origin.z`.
    pub origin: Vec3<F>,
    /// Stored acceleration given to each block particle. Default: zero.
    pub initial_acceleration: Vec3<F>,
}

impl<F: Float> BlockConfig<F> {
    /// The default block with every particle carrying a stored downward
    /// acceleration of 1. Paired with `GravityMode::Accumulate` this gives the
    /// classic drifting fall.
    pub fn classic() -> Self {
        BlockConfig {
            initial_acceleration: Vec3::from_f32(0.0, 0.0, -1.0),
            ..BlockConfig::default()
        }
    }
}

impl<F: Float> Default for BlockConfig<F> {
    fn default() -> Self {
        BlockConfig {
            dims: [5, 5, 5],
            spacing: F::from_f32(0.1),
            origin: Vec3::zero(),
            initial_acceleration: Vec3::zero(),
        }
    }
}

/// A flat lattice of particles below the block, static by default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloorConfig<F: Float> {
    /// Particle counts along x and y. Default: 10×10.
    pub dims: [usize; 2],
    /// Stacked layers, each one spacing above the last. Default: 1.
    pub layers: usize,
    /// Default: 0.1.
    pub spacing: F,
    /// Height of the bottom layer. Default: -0.5.
    pub height: F,
    /// Add a second lattice shifted by half a spacing in x and y to close the
    /// gaps between spheres. Default: true.
    pub staggered: bool,
    /// Default: true.
    pub is_static: bool,
}

impl<F: Float> Default for FloorConfig<F> {
    fn default() -> Self {
        FloorConfig {
            dims: [10, 10],
            layers: 1,
            spacing: F::from_f32(0.1),
            height: F::from_f32(-0.5),
            staggered: true,
            is_static: true,
        }
    }
}

/// The default scene: a falling block, optional static anchors and a floor.
///
/// Particle order is block (x outermost, z innermost), anchors, floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridScene<F: Float> {
    pub block: BlockConfig<F>,
    /// Positions of extra static particles. Default: one at (-0.3, -0.3, 0).
    pub anchors: AllocVec<Vec3<F>>,
    pub floor: Option<FloorConfig<F>>,
}

impl<F: Float> GridScene<F> {
    /// A bare block with no anchors and no floor.
    pub fn block(block: BlockConfig<F>) -> Self {
        GridScene { block, anchors: AllocVec::new(), floor: None }
    }

    pub fn with_anchor(mut self, pos: Vec3<F>) -> Self {
        self.anchors.push(pos);
        self
    }

    pub fn with_floor(mut self, floor: FloorConfig<F>) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn without_floor(mut self) -> Self {
        self.floor = None;
        self
    }

    /// Total particles this scene seeds.
    pub fn particle_count(&self) -> usize {
        let [bx, by, bz] = self.block.dims;
        let floor = self.floor.as_ref().map_or(0, |f| {
            let lattices = if f.staggered { 2 } else { 1 };
            f.dims[0] * f.dims[1] * f.layers * lattices
        });
        bx * by * bz + self.anchors.len() + floor
    }
}

impl<F: Float> Default for GridScene<F> {
    fn default() -> Self {
        GridScene {
            block: BlockConfig::default(),
            anchors: vec![Vec3::from_f32(-0.3, -0.3, 0.0)],
            floor: Some(FloorConfig::default()),
        }
    }
}

impl<F: Float> Scene<F> for GridScene<F> {
    fn populate(&self, config: &SimConfig<F>, particles: &mut AllocVec<Particle<F>>) {
        let radius = config.particle_radius;
        particles.reserve(self.particle_count());

        let block = &self.block;
        let [nx, ny, nz] = block.dims;
        let off_x = F::from_usize(nx) * block.spacing * F::half();
        let off_y = F::from_usize(ny) * block.spacing * F::half();
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let pos = Vec3::new(
                        block.origin.x + F::from_usize(x) * block.spacing - off_x,
                        block.origin.y + F::from_usize(y) * block.spacing - off_y,
                        block.origin.z + F::from_usize(z) * block.spacing,
                    );
                    particles.push(
                        Particle::new(pos, radius).with_acceleration(block.initial_acceleration),
                    );
                }
            }
        }

        for &pos in self.anchors.iter() {
            particles.push(Particle::fixed(pos, radius));
        }

        if let Some(floor) = &self.floor {
            let [fx, fy] = floor.dims;
            let off_x = F::from_usize(fx) * floor.spacing * F::half();
            let off_y = F::from_usize(fy) * floor.spacing * F::half();
            let mut shifts = vec![F::zero()];
            if floor.staggered {
                shifts.push(floor.spacing * F::half());
            }
            for shift in shifts {
                for x in 0..fx {
                    for y in 0..fy {
                        for z in 0..floor.layers {
                            let pos = Vec3::new(
                                F::from_usize(x) * floor.spacing - off_x - shift,
                                F::from_usize(y) * floor.spacing - off_y - shift,
                                floor.height + F::from_usize(z) * floor.spacing,
                            );
                            let p = Particle::new(pos, radius);
                            particles.push(Particle { is_static: floor.is_static, ..p });
                        }
                    }
                }
            }
        }
    }

    fn validate(&self) -> Result<(), SimError> {
        if !self.block.spacing.is_positive_finite() {
            return Err(SimError::InvalidSpacing);
        }
        if let Some(floor) = &self.floor {
            if !floor.spacing.is_positive_finite() {
                return Err(SimError::InvalidSpacing);
            }
        }
        Ok(())
    }
}
