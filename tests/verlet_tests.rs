use granule::{GravityMode, NoOpStepObserver, Particle, SimConfig, Simulation, Vec3};
use granule::Vec as _;

#[test]
fn first_substep_from_rest_is_exact() {
    let p0 = Vec3::new(0.25f32, -0.5, 2.0);
    let g = Vec3::new(0.0, 0.0, -9.81);
    let config = SimConfig::new().with_substeps(1).with_gravity(g).without_links();
    let dt = config.substep_dt(24.0).unwrap();

    let mut sim = Simulation::new(config, vec![Particle::new(p0, 0.05)]).unwrap();
    sim.step_frame(24.0, &mut NoOpStepObserver).unwrap();

    let p = sim.particles()[0].pos;
    assert_eq!(p.z, p0.z + g.z * (dt * dt));
    assert_eq!(p.x, p0.x);
    assert_eq!(p.y, p0.y);
}

#[test]
fn free_fall_follows_parabola() {
    let config = SimConfig::<f64>::new().without_links();
    let mut sim = Simulation::new(config, vec![Particle::new(Vec3::new(0.0, 0.0, 100.0), 0.05)]).unwrap();

    // One second at 60 fps.
    for _ in 0..60 {
        sim.step_frame(60.0, &mut NoOpStepObserver).unwrap();
    }

    let expected_z = 100.0 - 0.5 * 9.81 * 1.0;
    let z = sim.particles()[0].pos.z;
    assert!((z - expected_z).abs() < 0.01, "z = {}, expected ~ {}", z, expected_z);
}

#[test]
fn launched_particle_keeps_horizontal_velocity() {
    let config = SimConfig::<f64>::new().without_links();
    let dt = config.substep_dt(60.0).unwrap();
    let start = Particle::new(Vec3::new(0.0, 0.0, 10.0), 0.05)
        .with_velocity(Vec3::new(2.0, -1.0, 0.0), dt);
    let mut sim = Simulation::new(config, vec![start]).unwrap();

    for _ in 0..60 {
        sim.step_frame(60.0, &mut NoOpStepObserver).unwrap();
    }

    let p = &sim.particles()[0];
    assert!((p.pos.x - 2.0).abs() < 1e-9, "x = {}", p.pos.x);
    assert!((p.pos.y + 1.0).abs() < 1e-9, "y = {}", p.pos.y);
    assert!((p.velocity(dt).x - 2.0).abs() < 1e-6);
}

#[test]
fn static_particles_are_bit_identical_after_many_frames() {
    let mut sim = Simulation::<f32>::with_defaults(SimConfig::new()).unwrap();
    sim.reset().unwrap();
    let before: Vec<_> = sim
        .particles()
        .iter()
        .filter(|p| p.is_static)
        .map(|p| (p.pos, p.prev_pos))
        .collect();
    assert!(!before.is_empty());

    for _ in 0..48 {
        sim.step_frame(24.0, &mut NoOpStepObserver).unwrap();
    }

    let after: Vec<_> = sim
        .particles()
        .iter()
        .filter(|p| p.is_static)
        .map(|p| (p.pos, p.prev_pos))
        .collect();
    for ((pos0, prev0), (pos1, prev1)) in before.iter().zip(after.iter()) {
        assert_eq!(pos0.x.to_bits(), pos1.x.to_bits());
        assert_eq!(pos0.y.to_bits(), pos1.y.to_bits());
        assert_eq!(pos0.z.to_bits(), pos1.z.to_bits());
        assert_eq!(prev0, prev1);
    }
}

#[test]
fn accumulating_gravity_falls_faster() {
    let start = vec![Particle::new(Vec3::new(0.0f64, 0.0, 0.0), 0.05)];
    let constant = SimConfig::new().without_links();
    let accumulate = constant.clone().with_gravity_mode(GravityMode::Accumulate);

    let mut a = Simulation::new(constant, start.clone()).unwrap();
    let mut b = Simulation::new(accumulate, start).unwrap();
    for _ in 0..4 {
        a.step_frame(24.0, &mut NoOpStepObserver).unwrap();
        b.step_frame(24.0, &mut NoOpStepObserver).unwrap();
    }

    let za = a.particles()[0].pos.z;
    let zb = b.particles()[0].pos.z;
    assert!(zb < za, "accumulating z {} should be below constant z {}", zb, za);
    assert!(b.particles()[0].acceleration.length() > 9.81 * 60.0);
}
