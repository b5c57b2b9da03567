use super::*;

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, pos: Point) -> usize {
        debug_assert!(
            self.in_bounds(pos),
            "index: out of bounds ({}, {}) for {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    #[inline]
    pub fn checked_index(&self, pos: Point) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(self.index(pos))
        } else {
            None
        }
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0 && (pos.x as i64) < self.width as i64 && pos.y >= 0 && (pos.y as i64) < self.height as i64
    }

    /// Clamp to the nearest valid cell.
    #[inline]
    pub fn clamp(&self, pos: Point) -> Point {
        Point::new(
            pos.x.clamp(0, self.width as i32 - 1),
            pos.y.clamp(0, self.height as i32 - 1),
        )
    }
}
