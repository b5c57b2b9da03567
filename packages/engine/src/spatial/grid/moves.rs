use super::*;

impl Grid {
    /// Occupy `pos` with `id` if it is in bounds and empty. No mutation otherwise.
    pub fn place(&mut self, id: ParticleId, pos: Point) -> bool {
        let Some(idx) = self.checked_index(pos) else {
            return false;
        };
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(id);
        self.occupied += 1;
        true
    }

    /// Move the occupant of `from` into `to`.
    ///
    /// Caller guarantees `from` is occupied and `to` is in bounds and empty.
    #[inline]
    pub fn move_cell(&mut self, from: Point, to: Point) {
        let from_idx = self.index(from);
        let to_idx = self.index(to);
        debug_assert!(self.cells[from_idx].is_some(), "move_cell: source ({}, {}) is empty", from.x, from.y);
        debug_assert!(self.cells[to_idx].is_none(), "move_cell: destination ({}, {}) is occupied", to.x, to.y);

        self.cells[to_idx] = self.cells[from_idx].take();
    }

    /// Empty a cell, returning its previous occupant.
    pub fn clear_cell(&mut self, pos: Point) -> Option<ParticleId> {
        let idx = self.checked_index(pos)?;
        let prev = self.cells[idx].take();
        if prev.is_some() {
            self.occupied -= 1;
        }
        prev
    }

    // === Clear entire grid ===
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.occupied = 0;
    }
}
