use crate::domain::particle::KIND_EMPTY;
use crate::domain::point::Point;

use super::WorldCore;

/// Top-left pixel of a cell. Positions far off the grid saturate at the `i32` range.
pub(super) fn grid_to_pixel(world: &WorldCore, pos: Point) -> Point {
    let cell = world.config.cell_size;
    Point::new(pos.x.saturating_mul(cell.x), pos.y.saturating_mul(cell.y))
}

/// Cell containing a pixel. Pixels left of / above the origin map to negative cells.
pub(super) fn pixel_to_grid(world: &WorldCore, pixel: Point) -> Point {
    let cell = world.config.cell_size;
    Point::new(pixel.x.div_euclid(cell.x), pixel.y.div_euclid(cell.y))
}

pub(super) fn kind_buffer(world: &WorldCore) -> Vec<u8> {
    let mut out = vec![KIND_EMPTY; world.grid.size()];
    fill_kind_buffer(world, &mut out);
    out
}

/// Row-major kind ids; writes at most `out.len()` cells.
pub(super) fn fill_kind_buffer(world: &WorldCore, out: &mut [u8]) {
    for ((_, cell), slot) in world.grid.cells().zip(out.iter_mut()) {
        *slot = match cell {
            Some(id) => world.particles.get(id).map_or(KIND_EMPTY, |p| p.kind),
            None => KIND_EMPTY,
        };
    }
}
