use tracing::trace;

use crate::domain::particle::ParticleId;
use crate::domain::point::Point;

use super::WorldCore;

/// Drain `id`'s dependants and activate them, cascading through every particle that was
/// asleep. Only flags flip here: nobody is updated or re-queued, the next frame's active-set
/// refresh picks them up. Returns the number of particles woken.
pub(super) fn wake_dependants(world: &mut WorldCore, id: ParticleId) -> usize {
    let Some(p) = world.particles.get_mut(id) else {
        return 0;
    };
    if p.dependants.is_empty() {
        return 0;
    }
    let mut pending = std::mem::take(&mut p.dependants);
    let mut woken = 0;

    while let Some(dep) = pending.pop() {
        // Dependants removed since they registered simply no longer resolve.
        let Some(d) = world.particles.get_mut(dep) else {
            continue;
        };
        if d.active {
            continue;
        }
        d.active = true;
        woken += 1;
        pending.append(&mut d.dependants);
    }

    if woken > 0 {
        trace!(?id, woken, "woke dependants");
    }
    woken
}

/// External activation: wake `id` and its dependants. No-op for an already active particle.
pub(super) fn activate(world: &mut WorldCore, id: ParticleId) -> bool {
    let Some(p) = world.particles.get_mut(id) else {
        return false;
    };
    if p.active {
        return false;
    }
    p.active = true;
    wake_dependants(world, id);
    true
}

/// A particle going to sleep registers with the occupant of every offset it watches.
pub(super) fn register_dependencies(world: &mut WorldCore, id: ParticleId, pos: Point) {
    let Some(p) = world.particles.get(id) else {
        return;
    };
    let blockers: Vec<ParticleId> = p
        .depends_on
        .iter()
        .filter_map(|offset| world.grid.get(pos + *offset))
        .filter(|&blocker| blocker != id)
        .collect();

    for blocker in blockers {
        if let Some(b) = world.particles.get_mut(blocker) {
            if b.add_dependant(id) {
                world.stats.dependants_registered += 1;
            }
        }
    }
}
