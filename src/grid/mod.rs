//! Indexed-color grid model.
//!
//! This module defines the data the editor operates on:
//! - [`Grid`]: a fixed-size matrix of palette indices stored row-major
//! - [`PixelEdit`] / [`ChangeSet`]: cell-level differences used by the history
//!
//! Every operation here is pure with respect to its input grid. Transforms
//! (see [`transform`]) build a new grid from a read-only source so a pass
//! never reads a cell it has already overwritten.

pub mod transform;

use serde::{Deserialize, Serialize};

/// Index into the active palette. `0` is conventionally the background.
pub type ColorIndex = u32;

/// Fixed-size matrix of color indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<ColorIndex>,
}

impl Grid {
    /// Creates a grid of the given size with every cell set to 0.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Builds a grid from row vectors (`rows[y][x]`).
    ///
    /// The width is taken from the first row; shorter rows are padded with 0
    /// and longer rows are truncated so the result is always rectangular.
    pub fn from_rows(rows: &[Vec<ColorIndex>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, color) in row.iter().take(width).enumerate() {
                grid.cells[y * width + x] = *color;
            }
        }
        grid
    }

    /// Returns the grid as row vectors (`rows[y][x]`).
    pub fn to_rows(&self) -> Vec<Vec<ColorIndex>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells.chunks(self.width).map(<[_]>::to_vec).collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the color at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<ColorIndex> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Signed lookup used by transforms that compute source cells off-grid.
    pub fn get_signed(&self, x: i64, y: i64) -> Option<ColorIndex> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    /// Writes a cell. Returns the previous color, or `None` when out of range.
    pub fn set(&mut self, x: usize, y: usize, color: ColorIndex) -> Option<ColorIndex> {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            Some(std::mem::replace(&mut self.cells[idx], color))
        } else {
            None
        }
    }

    /// Visits every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, ColorIndex)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, color)| (idx % width, idx / width, *color))
    }

    /// Calls `f(x, y, color)` for every cell in row-major order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, ColorIndex),
    {
        for (x, y, color) in self.iter() {
            f(x, y, color);
        }
    }

    /// Builds a same-sized grid whose cells are `f(x, y)`.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> ColorIndex,
    {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// True when every cell is background (index 0).
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|color| *color == 0)
    }

    /// Largest color index stored in the grid, if any cell exists.
    pub fn max_color(&self) -> Option<ColorIndex> {
        self.cells.iter().copied().max()
    }

    /// Compares two grids cell by cell.
    ///
    /// The scan covers the union of both grids' extents. A cell present in only
    /// one of them is reported with `None` on the missing side; absence is
    /// never treated as color 0.
    pub fn diff(&self, other: &Grid) -> ChangeSet {
        let width = self.width.max(other.width);
        let height = self.height.max(other.height);
        let mut edits = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let old = self.get(x, y);
                let new = other.get(x, y);
                if old != new {
                    edits.push(PixelEdit { x, y, old, new });
                }
            }
        }
        ChangeSet { edits }
    }
}

/// One changed cell. Only produced when `old != new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelEdit {
    pub x: usize,
    pub y: usize,
    /// Color before the change; `None` if the cell did not exist.
    pub old: Option<ColorIndex>,
    /// Color after the change; `None` if the cell no longer exists.
    pub new: Option<ColorIndex>,
}

/// Ordered list of pixel edits forming one undoable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    edits: Vec<PixelEdit>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn edits(&self) -> &[PixelEdit] {
        &self.edits
    }

    /// Cells a host would paint to move from the old state to the new one.
    pub fn forward(&self) -> impl Iterator<Item = (usize, usize, ColorIndex)> + '_ {
        self.edits
            .iter()
            .filter_map(|edit| edit.new.map(|color| (edit.x, edit.y, color)))
    }

    /// Cells a host would paint to restore the old state.
    pub fn backward(&self) -> impl Iterator<Item = (usize, usize, ColorIndex)> + '_ {
        self.edits
            .iter()
            .filter_map(|edit| edit.old.map(|color| (edit.x, edit.y, color)))
    }
}
