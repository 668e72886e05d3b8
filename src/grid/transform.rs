//! Whole-grid geometric transforms.
//!
//! Each transform reads from `self` and writes a freshly allocated grid of the
//! same dimensions, so source cells are never overwritten before they are read.
//! The editor then routes the difference through the compositor.

use super::Grid;

impl Grid {
    /// Mirrors the grid across its vertical midline.
    pub fn flipped_horizontal(&self) -> Grid {
        let width = self.width();
        Grid::from_fn(width, self.height(), |x, y| {
            self.get(width - 1 - x, y).unwrap_or(0)
        })
    }

    /// Mirrors the grid across its horizontal midline.
    pub fn flipped_vertical(&self) -> Grid {
        let height = self.height();
        Grid::from_fn(self.width(), height, |x, y| {
            self.get(x, height - 1 - y).unwrap_or(0)
        })
    }

    /// Shifts all content by `(dx, dy)`.
    ///
    /// Content pushed past an edge is dropped; cells uncovered at the opposite
    /// edge become background.
    pub fn translated(&self, dx: i32, dy: i32) -> Grid {
        Grid::from_fn(self.width(), self.height(), |x, y| {
            self.get_signed(x as i64 - dx as i64, y as i64 - dy as i64)
                .unwrap_or(0)
        })
    }

    /// Rotates the content 90 degrees inside the current canvas.
    ///
    /// Clockwise: `new[y][x] = old[w-1-x][y]`. Counter-clockwise is its exact
    /// inverse, `new[y][x] = old[x][w-1-y]`. The canvas keeps its size, so on a
    /// non-square grid content that lands outside is clipped and uncovered
    /// cells become background.
    pub fn rotated(&self, counter_clockwise: bool) -> Grid {
        let w = self.width() as i64;
        Grid::from_fn(self.width(), self.height(), |x, y| {
            let (x, y) = (x as i64, y as i64);
            let (src_x, src_y) = if counter_clockwise {
                (w - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            self.get_signed(src_x, src_y).unwrap_or(0)
        })
    }

    /// Swaps indices 0 and 1 in every cell.
    ///
    /// Only meaningful for a two-color palette; returns `None` for any other
    /// palette size so callers can treat the request as a no-op.
    pub fn inverted(&self, palette_len: usize) -> Option<Grid> {
        if palette_len != 2 {
            return None;
        }
        Some(Grid::from_fn(self.width(), self.height(), |x, y| {
            match self.get(x, y) {
                Some(0) => 1,
                Some(1) => 0,
                Some(other) => other,
                None => 0,
            }
        }))
    }
}
