use super::{StepTimer, WorldCore};

pub(super) fn update(world: &mut WorldCore) {
    let timer = StepTimer::start();

    world.frame += 1;
    let frame = world.frame;
    world.stats.reset(frame);

    refresh_active_set(world);

    world.queue.fill(&world.active);
    world.stats.queued = world.queue.len() as u32;

    // Visit in uniformly random order. Particles resolved early as blockers have already
    // left the queue by the time their draw would come up.
    while let Some(id) = world.queue.pop_random(&mut world.rng) {
        super::update::update_particle(world, id, frame);
    }

    world.stats.step_ms = timer.elapsed_ms();
}

/// Reconcile the tracked active set with every particle's `active` flag.
fn refresh_active_set(world: &mut WorldCore) {
    let particles = &mut world.particles;
    world.active.retain(|&id| match particles.get_mut(id) {
        Some(p) if p.active => true,
        Some(p) => {
            p.tracked = false;
            false
        }
        None => false,
    });

    for (id, p) in world.particles.iter_mut() {
        if p.active && !p.tracked {
            p.tracked = true;
            world.active.push(id);
        }
    }
}
