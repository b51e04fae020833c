//! Pairwise penetration resolution driven by the spatial index.

use crate::float::Float;
use crate::particle::Particle;
use crate::spatial::SpatialIndex;
use crate::vec::{Vec, DEGENERATE_LENGTH};
use alloc::vec::Vec as AllocVec;

/// Counters from one collision pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Neighbor pairs returned by the index (self-pairs excluded).
    pub candidates: usize,
    /// Pairs that were actually overlapping and got pushed apart.
    pub contacts: usize,
    /// Overlapping pairs skipped because the particles were coincident.
    pub degenerate: usize,
}

impl CollisionStats {
    pub fn accumulate(&mut self, other: &CollisionStats) {
        self.candidates += other.candidates;
        self.contacts += other.contacts;
        self.degenerate += other.degenerate;
    }
}

/// Result of testing one ordered pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    /// Not overlapping.
    Separated,
    /// Overlap removed.
    Corrected,
    /// Overlapping but coincident, so no separation direction exists.
    Degenerate,
    /// Both particles static.
    Immovable,
}

/// Separate particles `i` and `j` if their spheres overlap, splitting the
/// correction evenly. Penetration is recomputed from current positions.
pub fn resolve_pair<F: Float>(particles: &mut [Particle<F>], i: usize, j: usize) -> PairOutcome {
    let (a, b) = (&particles[i], &particles[j]);
    if a.is_static && b.is_static {
        return PairOutcome::Immovable;
    }

    let offset = b.pos - a.pos;
    let dist = offset.length();
    let depth = a.radius + b.radius - dist;
    if depth <= F::zero() {
        return PairOutcome::Separated;
    }
    if dist.is_near_zero(F::from_f32(DEGENERATE_LENGTH)) {
        return PairOutcome::Degenerate;
    }

    let push = offset.scale(depth * F::half() / dist);
    particles[i].translate(-push);
    particles[j].translate(push);
    PairOutcome::Corrected
}

/// Gauss-Seidel collision pass over all particles.
///
/// Owns the spatial index and neighbor buffer so repeated passes reuse their
/// allocations.
#[derive(Clone, Debug, Default)]
pub struct CollisionResolver<F: Float> {
    index: SpatialIndex<F>,
    neighbors: AllocVec<usize>,
}

impl<F: Float> CollisionResolver<F> {
    pub fn new() -> Self {
        CollisionResolver {
            index: SpatialIndex::new(),
            neighbors: AllocVec::new(),
        }
    }

    /// Rebuild the index from current positions, then push every overlapping
    /// pair apart in particle order. Corrections made for earlier pairs are
    /// visible to later ones.
    pub fn resolve(&mut self, particles: &mut [Particle<F>]) -> CollisionStats {
        let mut stats = CollisionStats::default();
        if particles.len() < 2 {
            return stats;
        }

        let max_radius = particles.iter().fold(F::zero(), |m, p| m.max(p.radius));
        self.index.rebuild(particles, max_radius * F::two());

        for i in 0..particles.len() {
            let reach = particles[i].radius + max_radius;
            self.index.query(particles[i].pos, reach, &mut self.neighbors);

            for &j in self.neighbors.iter() {
                if j == i {
                    continue;
                }
                stats.candidates += 1;
                match resolve_pair(particles, i, j) {
                    PairOutcome::Corrected => stats.contacts += 1,
                    PairOutcome::Degenerate => stats.degenerate += 1,
                    PairOutcome::Separated | PairOutcome::Immovable => {}
                }
            }
        }

        stats
    }

    /// The index as built by the last pass.
    pub fn index(&self) -> &SpatialIndex<F> {
        &self.index
    }
}
