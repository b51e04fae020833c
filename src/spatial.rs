//! Uniform-grid spatial index for radius neighbor queries.
//!
//! Every particle is bucketed into a cubic cell; entries are kept sorted by
//! cell so each cell's occupants form a contiguous run found by binary
//! search. The index is a snapshot: it must be rebuilt whenever positions
//! change, which for the solver means once per substep.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// Integer cell coordinates.
pub type CellKey = (i32, i32, i32);

/// Queries covering more cells than this scan the snapshot linearly instead.
const MAX_QUERY_CELLS: i64 = 4096;

/// Snapshot of particle positions bucketed into a uniform grid.
#[derive(Clone, Debug)]
pub struct SpatialIndex<F: Float> {
    cell_size: F,
    inv_cell_size: F,
    entries: AllocVec<(CellKey, usize)>,
    positions: AllocVec<Vec3<F>>,
}

impl<F: Float> SpatialIndex<F> {
    pub fn new() -> Self {
        SpatialIndex {
            cell_size: F::one(),
            inv_cell_size: F::one(),
            entries: AllocVec::new(),
            positions: AllocVec::new(),
        }
    }

    /// Rebuild from the current particle positions.
    ///
    /// With `cell_size` at least the largest query radius, every query stays
    /// within a 3×3×3 block of cells. A non-positive size falls back to 1.0.
    pub fn rebuild(&mut self, particles: &[Particle<F>], cell_size: F) {
        self.cell_size = if cell_size.is_positive_finite() { cell_size } else { F::one() };
        self.inv_cell_size = F::one() / self.cell_size;

        self.positions.clear();
        self.positions.extend(particles.iter().map(|p| p.pos));

        self.entries.clear();
        for (i, pos) in self.positions.iter().enumerate() {
            self.entries.push((cell_of(*pos, self.inv_cell_size), i));
        }
        self.entries.sort_unstable();
    }

    /// Collect into `out` the index of every particle whose snapshot position
    /// lies within `radius` of `center` (inclusive). A particle queried at its
    /// own position finds itself.
    pub fn query(&self, center: Vec3<F>, radius: F, out: &mut AllocVec<usize>) {
        out.clear();
        if self.entries.is_empty() {
            return;
        }
        let radius = radius.max(F::zero());
        let reach = Vec3::splat(radius);
        let lo = cell_of(center - reach, self.inv_cell_size);
        let hi = cell_of(center + reach, self.inv_cell_size);

        let span = |a: i32, b: i32| i64::from(b) - i64::from(a) + 1;
        let cells = span(lo.0, hi.0)
            .saturating_mul(span(lo.1, hi.1))
            .saturating_mul(span(lo.2, hi.2));

        if !center.is_finite() || cells > MAX_QUERY_CELLS {
            self.scan(center, radius, out);
            return;
        }

        let r2 = radius * radius;
        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    for &(_, i) in self.cell((cx, cy, cz)) {
                        if self.positions[i].distance_sq(center) <= r2 {
                            out.push(i);
                        }
                    }
                }
            }
        }
    }

    /// Entries in a single cell.
    pub fn cell(&self, key: CellKey) -> &[(CellKey, usize)] {
        let start = self.entries.partition_point(|(k, _)| *k < key);
        let len = self.entries[start..].partition_point(|(k, _)| *k == key);
        &self.entries[start..start + len]
    }

    /// Cell containing `pos` under the current cell size.
    pub fn cell_key(&self, pos: Vec3<F>) -> CellKey {
        cell_of(pos, self.inv_cell_size)
    }

    pub fn cell_size(&self) -> F { self.cell_size }
    pub fn len(&self) -> usize { self.positions.len() }
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }

    fn scan(&self, center: Vec3<F>, radius: F, out: &mut AllocVec<usize>) {
        let r2 = radius * radius;
        out.extend(
            self.positions
                .iter()
                .enumerate()
                .filter(|(_, p)| p.distance_sq(center) <= r2)
                .map(|(i, _)| i),
        );
    }
}

impl<F: Float> Default for SpatialIndex<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_of<F: Float>(pos: Vec3<F>, inv_cell_size: F) -> CellKey {
    (
        (pos.x * inv_cell_size).floor().to_i32(),
        (pos.y * inv_cell_size).floor().to_i32(),
        (pos.z * inv_cell_size).floor().to_i32(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn line(n: usize, step: f32) -> AllocVec<Particle<f32>> {
        (0..n)
            .map(|i| Particle::new(Vec3::new(i as f32 * step, 0.0, 0.0), 0.05))
            .collect()
    }

    #[test]
    fn finds_itself() {
        let particles = line(5, 1.0);
        let mut index = SpatialIndex::new();
        index.rebuild(&particles, 0.1);
        let mut out = AllocVec::new();
        index.query(particles[3].pos, 0.1, &mut out);
        assert_eq!(out, vec![3]);
    }

    #[test]
    fn query_radius_is_inclusive() {
        let particles = line(3, 0.5);
        let mut index = SpatialIndex::new();
        index.rebuild(&particles, 0.25);
        let mut out = AllocVec::new();
        index.query(particles[1].pos, 0.5, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1, 2]);
    }

    #[test]
    fn negative_coordinates_bucket_below_zero() {
        let mut index = SpatialIndex::<f32>::new();
        index.rebuild(&[], 0.1);
        assert_eq!(index.cell_key(Vec3::new(-0.05, 0.05, -0.15)), (-1, 0, -2));
    }

    #[test]
    fn oversized_query_falls_back_to_scan() {
        let particles = line(10, 1.0);
        let mut index = SpatialIndex::new();
        index.rebuild(&particles, 0.01);
        let mut out = AllocVec::new();
        index.query(Vec3::zero(), 100.0, &mut out);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn invalid_cell_size_is_replaced() {
        let particles = line(2, 1.0);
        let mut index = SpatialIndex::new();
        index.rebuild(&particles, 0.0);
        assert_eq!(index.cell_size(), 1.0);
        assert_eq!(index.len(), 2);
    }
}
