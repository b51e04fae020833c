//! Position-based dynamics for particle piles, ropes and clumps.
//!
//! `granule` advances spherical particles with Verlet integration, pushes
//! overlapping pairs apart using a uniform-grid spatial index, and relaxes
//! distance links between nearby particles so seeded blocks hang together.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, constant or accumulating gravity
//! - **Grid-accelerated collisions**: Gauss-Seidel projection of overlapping pairs
//! - **Links**: midpoint-goal distance constraints built from seed proximity
//! - **Fixed substepping**: N substeps per frame, deterministic for a given config
//! - **Host layer**: frame-index reset and a `Renderer` hand-off trait
//! - **Observable**: monitor substeps via the `StepObserver` trait or the `log` facade
//! - **`no_std` compatible**: needs only `alloc`
//!
//! ```
//! use granule::{NoOpStepObserver, SimConfig, Simulation};
//!
//! let mut sim = Simulation::<f32>::with_defaults(SimConfig::new()).unwrap();
//! sim.step_frame(24.0, &mut NoOpStepObserver).unwrap();
//! assert_eq!(sim.positions().len(), sim.particle_count());
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod link;
pub mod spatial;
pub mod collision;
pub mod integrator;
pub mod seed;
pub mod solver;
pub mod observer;
pub mod config;
pub mod error;
pub mod host;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use link::{Link, build_links, solve_links};
pub use spatial::SpatialIndex;
pub use collision::{CollisionResolver, CollisionStats, PairOutcome, resolve_pair};
pub use integrator::{Integrator, GravityMode};
pub use seed::{Scene, GridScene, BlockConfig, FloorConfig};
pub use solver::{Simulation, SimState};
pub use config::{SimConfig, LinkConfig};
pub use observer::{StepObserver, NoOpStepObserver, LogObserver, FrameStats};
pub use error::SimError;
pub use host::{FrameDriver, Renderer};
