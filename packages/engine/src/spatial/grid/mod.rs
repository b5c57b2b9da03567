//! Grid - occupancy map from cell coordinates to particle handles
//!
//! The grid owns no behavior: it only answers "who is here" and moves handles between cells.
//! Every write keeps the one-particle-per-cell invariant; validation of a destination is the
//! caller's job so that `move_cell` stays a cheap, infallible primitive.

use crate::domain::particle::ParticleId;
use crate::domain::point::Point;

mod indexing;
mod moves;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    cells: Vec<Option<ParticleId>>,
    occupied: usize,
}

impl Grid {
    /// Dimensions are validated by `SimConfig` before a grid is built.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            size,
            cells: vec![None; size],
            occupied: 0,
        }
    }

    // === Cell access ===

    /// Bounds status plus occupant. Out of bounds never yields a handle.
    #[inline]
    pub fn get_cell(&self, pos: Point) -> (bool, Option<ParticleId>) {
        match self.checked_index(pos) {
            Some(idx) => (true, self.cells[idx]),
            None => (false, None),
        }
    }

    #[inline]
    pub fn get(&self, pos: Point) -> Option<ParticleId> {
        self.checked_index(pos).and_then(|idx| self.cells[idx])
    }

    /// In bounds and unoccupied.
    #[inline]
    pub fn is_empty(&self, pos: Point) -> bool {
        matches!(self.get_cell(pos), (true, None))
    }

    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Option<ParticleId>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (self.coords(idx), *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ParticleId> {
        let mut map: SlotMap<ParticleId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn get_cell_reports_bounds() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.get_cell(Point::new(0, 0)), (true, None));
        assert_eq!(grid.get_cell(Point::new(3, 2)), (true, None));
        assert_eq!(grid.get_cell(Point::new(4, 0)), (false, None));
        assert_eq!(grid.get_cell(Point::new(0, -1)), (false, None));
        assert!(!grid.is_empty(Point::new(-1, 0)));
    }

    #[test]
    fn place_refuses_occupied_and_out_of_bounds() {
        let id = ids(2);
        let mut grid = Grid::new(4, 4);
        assert!(grid.place(id[0], Point::new(1, 1)));
        assert!(!grid.place(id[1], Point::new(1, 1)));
        assert!(!grid.place(id[1], Point::new(4, 1)));
        assert_eq!(grid.get(Point::new(1, 1)), Some(id[0]));
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn move_and_clear_keep_single_occupancy() {
        let id = ids(1);
        let mut grid = Grid::new(4, 4);
        assert!(grid.place(id[0], Point::new(0, 0)));
        grid.move_cell(Point::new(0, 0), Point::new(0, 1));
        assert_eq!(grid.get(Point::new(0, 0)), None);
        assert_eq!(grid.get(Point::new(0, 1)), Some(id[0]));
        assert_eq!(grid.occupied(), 1);

        assert_eq!(grid.clear_cell(Point::new(0, 1)), Some(id[0]));
        assert_eq!(grid.clear_cell(Point::new(0, 1)), None);
        assert_eq!(grid.occupied(), 0);
    }
}
