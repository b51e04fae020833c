use granule::{
    BlockConfig, GridScene, LogObserver, NoOpStepObserver, SimConfig, Simulation, Vec3,
};

/// 2×2×2 block (spacing 0.1, radius 0.05) above one static particle under its footprint.
fn small_block_over_anchor() -> Simulation<f32> {
    let block = BlockConfig {
        dims: [2, 2, 2],
        spacing: 0.1,
        origin: Vec3::new(0.0, 0.0, 0.1),
        initial_acceleration: Vec3::new(0.0, 0.0, 0.0),
    };
    let scene = GridScene::block(block).with_anchor(Vec3::new(-0.05, -0.05, 0.0));
    let config = SimConfig::new().with_particle_radius(0.05);
    Simulation::new(config, scene).unwrap()
}

#[test]
fn nothing_tunnels_through_anchor_in_one_frame() {
    let mut sim = small_block_over_anchor();
    let stats = sim.step_frame(24.0, &mut LogObserver).unwrap();
    assert_eq!(stats.substeps, 16);

    let particles = sim.particles();
    assert_eq!(particles.len(), 9);
    let anchor = particles.iter().find(|p| p.is_static).unwrap();
    assert_eq!(anchor.pos, Vec3::new(-0.05, -0.05, 0.0));

    let radius_sum = 0.1;
    for p in particles.iter().filter(|p| !p.is_static) {
        assert!(
            p.pos.z >= anchor.pos.z - radius_sum,
            "particle at z {} fell through anchor at z {}",
            p.pos.z,
            anchor.pos.z
        );
    }
}

#[test]
fn block_settles_on_default_floor() {
    let scene = GridScene { anchors: Vec::new(), ..GridScene::default() };
    let mut sim = Simulation::<f32>::new(SimConfig::new(), scene).unwrap();
    for _ in 0..72 {
        sim.step_frame(24.0, &mut NoOpStepObserver).unwrap();
    }
    // Floor particles sit at z = -0.5 with radius 0.05.
    for p in sim.particles().iter().filter(|p| !p.is_static) {
        assert!(p.pos.z > -0.5 - 0.1, "particle fell through the floor: z = {}", p.pos.z);
        assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
    }
}

#[test]
fn frame_stats_sum_substeps() {
    let mut sim = small_block_over_anchor();
    let mut total = 0;
    for _ in 0..3 {
        total += sim.step_frame(30.0, &mut NoOpStepObserver).unwrap().substeps;
    }
    assert_eq!(total, 48);
}
