//! Distance links between particle pairs and their relaxation.

use crate::error::SimError;
use crate::float::Float;
use crate::particle::Particle;
use crate::spatial::SpatialIndex;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// A distance constraint between particles `a` and `b` (indices into the
/// simulation's particle list).
#[derive(Clone, Debug, PartialEq)]
pub struct Link<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
}

impl<F: Float> Link<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F) -> Result<Self, SimError> {
        if a == b {
            return Err(SimError::SelfLink { index: a });
        }
        if !rest_length.is_finite() || rest_length < F::zero() {
            return Err(SimError::InvalidRestLength);
        }
        if !stiffness.is_positive_finite() || stiffness > F::one() {
            return Err(SimError::InvalidStiffness);
        }
        Ok(Link { a, b, rest_length, stiffness })
    }

    /// Link two particles at their current separation.
    pub fn between(
        a: usize,
        b: usize,
        particles: &[Particle<F>],
        stiffness: F,
    ) -> Result<Self, SimError> {
        let count = particles.len();
        for index in [a, b] {
            if index >= count {
                return Err(SimError::ParticleOutOfBounds { index, count });
            }
        }
        let rest_length = particles[a].pos.distance(particles[b].pos);
        Link::new(a, b, rest_length, stiffness)
    }

    /// Pull both endpoints toward the positions that would restore the rest
    /// length about their midpoint, by `stiffness` of the way.
    ///
    /// Returns `false` without touching anything when the endpoints coincide.
    pub fn solve(&self, particles: &mut [Particle<F>]) -> bool {
        let p1 = particles[self.a].pos;
        let p2 = particles[self.b].pos;
        let Some(norm) = (p2 - p1).try_normalize() else {
            return false;
        };

        let mid = p1.midpoint(p2);
        let half_span = norm.scale(self.rest_length * F::half());
        let goal1 = mid - half_span;
        let goal2 = mid + half_span;

        particles[self.a].translate((goal1 - p1).scale(self.stiffness));
        particles[self.b].translate((goal2 - p2).scale(self.stiffness));
        true
    }

    /// Current length minus rest length.
    pub fn stretch(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos) - self.rest_length
    }
}

/// Relax every link once, in insertion order. Returns how many links were
/// skipped because their endpoints coincided.
pub fn solve_links<F: Float>(links: &[Link<F>], particles: &mut [Particle<F>]) -> usize {
    links.iter().filter(|link| !link.solve(particles)).count()
}

/// Link every pair `i < j` closer than `threshold`, at its current distance.
///
/// Links come out ordered by `(i, j)`. Pairs of two static particles are left
/// unlinked since neither end could ever move.
pub fn build_links<F: Float>(
    particles: &[Particle<F>],
    threshold: F,
    stiffness: F,
) -> Result<AllocVec<Link<F>>, SimError> {
    if !threshold.is_positive_finite() {
        return Err(SimError::InvalidLinkDistance);
    }

    let mut index = SpatialIndex::new();
    index.rebuild(particles, threshold);

    let mut links = AllocVec::new();
    let mut neighbors = AllocVec::new();
    let t2 = threshold * threshold;

    for (i, p1) in particles.iter().enumerate() {
        index.query(p1.pos, threshold, &mut neighbors);
        neighbors.retain(|&j| j > i);
        neighbors.sort_unstable();

        for &j in neighbors.iter() {
            let p2 = &particles[j];
            if p1.is_static && p2.is_static {
                continue;
            }
            if p1.pos.distance_sq(p2.pos) < t2 {
                links.push(Link::between(i, j, particles, stiffness)?);
            }
        }
    }

    Ok(links)
}
