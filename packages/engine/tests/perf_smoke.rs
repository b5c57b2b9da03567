use sandpile_engine::{SimConfig, SimError, World, KIND_GRAIN, KIND_SAND, KIND_STONE};

#[test]
fn perf_smoke_step() {
    let mut world = World::from_config(SimConfig::new(128, 64).with_seed(11)).unwrap();
    for x in 0..128 {
        for y in 0..32 {
            world.add_particle(x, y, KIND_SAND);
        }
    }
    assert_eq!(world.particle_count(), 128 * 32);

    world.update();
    let stats = world.step_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.frame(), 1);
    assert_eq!(stats.queued(), 128 * 32);
    assert!(stats.processed() <= 128 * 32);
    assert_eq!(stats.stale_skips(), 0);
}

#[test]
fn settled_world_does_no_work() {
    let mut world = World::from_config(SimConfig::new(64, 32).with_seed(5)).unwrap();
    world.add_particles_in_radius(32, 4, 3, KIND_SAND);
    for _ in 0..200 {
        world.update();
    }
    assert_eq!(world.active_count(), 0);

    world.update();
    let stats = world.step_stats();
    assert_eq!(stats.queued(), 0);
    assert_eq!(stats.processed(), 0);

    // Digging out a support wakes what rests on it.
    world.add_particle(5, 31, KIND_STONE);
    world.add_particle(5, 30, KIND_GRAIN);
    world.update();
    world.update();
    assert_eq!(world.active_count(), 0);
    assert_eq!(world.cell_kind(5, 30), KIND_GRAIN);

    assert!(world.remove_particle(5, 31));
    assert_eq!(world.active_count(), 1);
    world.update();
    assert_eq!(world.cell_kind(5, 31), KIND_GRAIN);
    assert_eq!(world.core().particle_count(), 30);
}

#[test]
fn native_constructor_reports_typed_errors() {
    assert!(matches!(World::from_config(SimConfig::new(0, 5)), Err(SimError::InvalidConfig(_))));

    let mut world = World::from_config(SimConfig::new(8, 8).with_seed(1)).unwrap();
    assert_eq!(world.remove_particles_in_radius(4, 4, 50_000), 0);
    assert_eq!(world.add_particles_in_radius(4, 4, 50_000, KIND_STONE), 64);
    assert_eq!(world.grid_to_pixel(1 << 30, 0), vec![i32::MAX, 0]);
}
