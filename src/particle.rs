//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::{Vec, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A spherical Verlet particle. Velocity is implicit in `pos - prev_pos`.
///
/// Static particles act as immovable boundaries: nothing in the solver
/// writes to their `pos` or `prev_pos` after seeding.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    /// Base acceleration, set at seed time.
    pub acceleration: Vec3<F>,
    pub radius: F,
    pub is_static: bool,
}

impl<F: Float> Particle<F> {
    /// A dynamic particle at rest.
    pub fn new(pos: Vec3<F>, radius: F) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            acceleration: Vec3::zero(),
            radius,
            is_static: false,
        }
    }

    /// A static particle.
    pub fn fixed(pos: Vec3<F>, radius: F) -> Self {
        Particle { is_static: true, ..Particle::new(pos, radius) }
    }

    pub fn with_acceleration(mut self, acceleration: Vec3<F>) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Give the particle an initial velocity by moving `prev_pos` back along it.
    pub fn with_velocity(mut self, velocity: Vec3<F>, dt: F) -> Self {
        if !self.is_static {
            self.prev_pos = self.pos - velocity.scale(dt);
        }
        self
    }

    /// One Störmer-Verlet step: `pos += (pos - prev_pos) + (acceleration + gravity) * dt²`.
    pub fn integrate(&mut self, dt: F, gravity: Vec3<F>) {
        if self.is_static {
            return;
        }
        let delta = self.pos - self.prev_pos;
        let accel = self.acceleration + gravity;
        self.prev_pos = self.pos;
        self.pos = self.pos + delta + accel.scale(dt * dt);
    }

    /// Shift the particle by `offset`. Static particles ignore corrections.
    pub fn translate(&mut self, offset: Vec3<F>) {
        if !self.is_static {
            self.pos = self.pos + offset;
        }
    }

    /// Position change over the last substep.
    pub fn displacement(&self) -> Vec3<F> {
        self.pos - self.prev_pos
    }

    pub fn velocity(&self, dt: F) -> Vec3<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec3::zero();
        }
        self.displacement().scale(F::one() / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_particle_ignores_integration_and_corrections() {
        let mut p = Particle::fixed(Vec3::new(1.0f32, 2.0, 3.0), 0.05);
        p.integrate(0.01, Vec3::new(0.0, 0.0, -9.81));
        p.translate(Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(p.pos, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.prev_pos, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn integrate_carries_velocity() {
        let dt = 0.1f64;
        let mut p = Particle::new(Vec3::zero(), 0.05).with_velocity(Vec3::new(1.0, 0.0, 0.0), dt);
        p.integrate(dt, Vec3::zero());
        assert!((p.pos.x - 0.1).abs() < 1e-12);
        assert!((p.velocity(dt).x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stored_acceleration_is_not_consumed() {
        let a = Vec3::new(0.0f32, 0.0, -1.0);
        let mut p = Particle::new(Vec3::zero(), 0.05).with_acceleration(a);
        p.integrate(0.1, Vec3::zero());
        assert_eq!(p.acceleration, a);
    }
}
