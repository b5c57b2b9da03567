use crate::domain::particle::ParticleId;
use crate::domain::point::Point;

use super::WorldCore;

/// Clear the particle's cell and occupy `dest`, keeping `Particle::pos` in lock-step.
///
/// No validation beyond debug assertions: behaviors only call this after seeing `dest`
/// in bounds and empty within the same turn.
pub(super) fn move_particle(world: &mut WorldCore, id: ParticleId, dest: Point) {
    let Some(p) = world.particles.get_mut(id) else {
        debug_assert!(false, "move_particle: unknown particle");
        return;
    };
    debug_assert_eq!(world.grid.get(p.pos), Some(id), "move_particle: grid and particle disagree");

    world.grid.move_cell(p.pos, dest);
    p.pos = dest;
}
