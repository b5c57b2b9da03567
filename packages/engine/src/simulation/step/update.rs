use tracing::trace;

use crate::domain::particle::ParticleId;
use crate::systems::behaviors::{Behavior, BehaviorOutcome, UpdateContext};

use super::wake;
use super::WorldCore;

/// Run one particle's behavior chain for `frame`.
///
/// Called by the scheduler for its own turns and by behaviors resolving a blocker. The frame
/// stamp makes a second call within the same frame a no-op.
pub(super) fn update_particle(world: &mut WorldCore, id: ParticleId, frame: u64) {
    let Some(p) = world.particles.get_mut(id) else {
        world.queue.remove(id);
        return;
    };
    if frame <= p.last_frame {
        world.stats.stale_skips += 1;
        trace!(?id, frame, last_frame = p.last_frame, "skipping stale update");
        return;
    }
    p.last_frame = frame;
    let pos = p.pos;

    // Behaviors are taken out for the duration of the chain so they can borrow the world.
    // A recursive call back into this particle stops at the frame guard above.
    let mut behaviors = std::mem::take(&mut p.behaviors);
    let mut keep_active = false;
    let mut moved = false;
    {
        let mut ctx = UpdateContext::new(world, id, pos, frame);
        for behavior in behaviors.iter_mut() {
            match behavior.apply(&mut ctx) {
                BehaviorOutcome::Moved => {
                    keep_active = true;
                    moved = true;
                    break;
                }
                BehaviorOutcome::Blocked => keep_active = true,
                BehaviorOutcome::NoOp => {}
            }
        }
    }
    if moved {
        for behavior in behaviors.iter_mut() {
            behavior.on_moved();
        }
    }

    world.stats.processed += 1;
    if moved {
        world.stats.moved += 1;
    } else if keep_active {
        world.stats.blocked += 1;
    }

    let Some(p) = world.particles.get_mut(id) else {
        return;
    };
    p.behaviors = behaviors;
    p.active = keep_active;
    let pos = p.pos;
    world.queue.remove(id);

    if keep_active {
        let woken = wake::wake_dependants(world, id);
        world.stats.woken += woken as u32;
    } else {
        wake::register_dependencies(world, id, pos);
    }
}
