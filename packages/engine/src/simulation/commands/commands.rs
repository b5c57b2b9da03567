use crate::domain::particle::{KindId, Particle, ParticleId};
use crate::domain::point::Point;

use super::wake;
use super::WorldCore;

pub(super) fn insert_particle(world: &mut WorldCore, mut particle: Particle, pos: Point) -> Option<ParticleId> {
    if !world.grid.is_empty(pos) {
        return None;
    }

    particle.pos = pos;
    particle.tracked = false;
    particle.dependants.clear();

    let id = world.particles.insert(particle);
    if !world.grid.place(id, pos) {
        world.particles.remove(id);
        return None;
    }
    Some(id)
}

pub(super) fn spawn(world: &mut WorldCore, kind: KindId, pos: Point) -> Option<ParticleId> {
    if !world.grid.is_empty(pos) {
        return None;
    }
    let particle = world.content.spawn(kind).ok()?;
    insert_particle(world, particle, pos)
}

pub(super) fn add_particles_in_radius(world: &mut WorldCore, center: Point, radius: i32, kind: KindId) -> usize {
    if !world.content.is_valid_kind(kind) {
        return 0;
    }
    let mut added = 0;
    for pos in disc(world, center, radius) {
        if spawn(world, kind, pos).is_some() {
            added += 1;
        }
    }
    added
}

pub(super) fn remove_particle(world: &mut WorldCore, pos: Point) -> bool {
    let Some(id) = world.grid.get(pos) else {
        return false;
    };

    // The vanishing particle was someone's blocker: wake them before it goes.
    wake::wake_dependants(world, id);

    world.queue.remove(id);
    world.active.retain(|&a| a != id);
    world.grid.clear_cell(pos);
    world.particles.remove(id);
    true
}

pub(super) fn remove_particles_in_radius(world: &mut WorldCore, center: Point, radius: i32) -> usize {
    let mut removed = 0;
    for pos in disc(world, center, radius) {
        if remove_particle(world, pos) {
            removed += 1;
        }
    }
    removed
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid.clear();
    world.particles.clear();
    world.active.clear();
    world.queue.clear();
    world.frame = 0;
}

/// In-bounds cells within `radius` of `center`. Only the part of the disc that overlaps the
/// grid is walked, so huge radii cost no more than the grid itself.
fn disc(world: &WorldCore, center: Point, radius: i32) -> Vec<Point> {
    let radius = i64::from(radius.max(0));
    let r2 = radius * radius;
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let (w, h) = (i64::from(world.grid.width()), i64::from(world.grid.height()));

    let (x0, x1) = ((cx - radius).max(0), (cx + radius).min(w - 1));
    let (y0, y1) = ((cy - radius).max(0), (cy + radius).min(h - 1));

    let mut cells = Vec::new();
    for y in y0..=y1 {
        let dy = y - cy;
        for x in x0..=x1 {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                // Clamped to the grid, so both coordinates fit in i32.
                cells.push(Point::new(x as i32, y as i32));
            }
        }
    }
    cells
}
