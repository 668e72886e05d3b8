use crate::draw::CellMetrics;
use crate::error::EditorError;
use crate::grid::{ColorIndex, Grid};
use crate::input::tool::InputMode;
use log::{debug, info};

use super::{DragState, EditorState};

impl EditorState {
    /// Switches the input mode. The grid and any in-flight drag are untouched.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            debug!("Input mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Selects the palette index painted by the primary button in pixel mode.
    pub fn set_color(&mut self, index: ColorIndex) -> Result<(), EditorError> {
        if !self.palette.contains(index) {
            return Err(EditorError::UnknownColor {
                index,
                palette_len: self.palette.len(),
            });
        }
        self.active_color = index;
        Ok(())
    }

    /// Replaces the grid content with `next`, repainting only differing
    /// cells. Returns true if anything changed.
    fn apply(&mut self, next: &Grid, label: &str) -> bool {
        let changed = self.write_grid(next);
        if changed {
            debug!("Applied {}", label);
            self.mark_changed();
        }
        changed
    }

    /// Sets every cell to background.
    pub fn clear(&mut self) -> bool {
        let blank = Grid::new(self.grid.width(), self.grid.height());
        self.apply(&blank, "clear")
    }

    /// Empties the undo and redo stacks without touching the grid.
    pub fn clear_history(&mut self) {
        self.history.clear(&self.grid);
    }

    /// Replaces all cells with `template`.
    ///
    /// History is not reset; call [`EditorState::clear_history`] afterwards
    /// if the template should not be undoable.
    ///
    /// # Errors
    /// The template must match the grid dimensions and only use palette indices.
    pub fn apply_template(&mut self, template: &Grid) -> Result<bool, EditorError> {
        if template.width() != self.grid.width() || template.height() != self.grid.height() {
            return Err(EditorError::TemplateSize {
                width: self.grid.width(),
                height: self.grid.height(),
                actual_width: template.width(),
                actual_height: template.height(),
            });
        }
        if let Some((x, y, index)) = template
            .iter()
            .find(|(_, _, color)| !self.palette.contains(*color))
        {
            return Err(EditorError::ColorOutOfPalette {
                x,
                y,
                index,
                palette_len: self.palette.len(),
            });
        }
        Ok(self.apply(template, "template"))
    }

    pub fn flip_horizontal(&mut self) -> bool {
        let next = self.grid.flipped_horizontal();
        self.apply(&next, "horizontal flip")
    }

    pub fn flip_vertical(&mut self) -> bool {
        let next = self.grid.flipped_vertical();
        self.apply(&next, "vertical flip")
    }

    /// Shifts content by `(dx, dy)` cells; content leaving the grid is lost.
    pub fn translate(&mut self, dx: i32, dy: i32) -> bool {
        let next = self.grid.translated(dx, dy);
        self.apply(&next, "translation")
    }

    /// Rotates content a quarter turn within the current canvas.
    pub fn rotate(&mut self, counter_clockwise: bool) -> bool {
        let next = self.grid.rotated(counter_clockwise);
        self.apply(&next, "rotation")
    }

    /// Swaps background and foreground. No-op unless the palette has exactly
    /// two entries.
    pub fn invert(&mut self) -> bool {
        match self.grid.inverted(self.palette.len()) {
            Some(next) => self.apply(&next, "inversion"),
            None => {
                debug!(
                    "Invert ignored for {}-entry palette",
                    self.palette.len()
                );
                false
            }
        }
    }

    /// Reverts the newest undo step. Pending edits are committed first so
    /// they are what gets undone.
    pub fn undo(&mut self) -> bool {
        self.flush_history();
        let Some(changes) = self.history.undo() else {
            return false;
        };
        for (x, y, color) in changes.backward() {
            self.compositor
                .paint_cell(&mut self.grid, &self.palette, x, y, color);
        }
        debug!("Undo restored {} cell(s)", changes.len());
        self.history.sync(&self.grid);
        self.mark_changed();
        true
    }

    /// Reapplies the newest undone step.
    pub fn redo(&mut self) -> bool {
        self.flush_history();
        let Some(changes) = self.history.redo() else {
            return false;
        };
        for (x, y, color) in changes.forward() {
            self.compositor
                .paint_cell(&mut self.grid, &self.palette, x, y, color);
        }
        debug!("Redo reapplied {} cell(s)", changes.len());
        self.history.sync(&self.grid);
        self.mark_changed();
        true
    }

    /// Changes the grid dimensions.
    ///
    /// Existing content is discarded: the session restarts from a blank grid
    /// of the new size, layers are rebuilt and history is cleared.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EditorError> {
        if width == 0 || height == 0 {
            return Err(EditorError::ZeroDimension { width, height });
        }
        let blank = Grid::new(width, height);
        let metrics = self.compositor.metrics();
        self.compositor
            .rebuild(&blank, &self.palette, metrics, &mut self.guide_cache)?;
        self.grid = blank;
        self.state = DragState::Idle;
        self.history.clear(&self.grid);
        info!("Resized grid to {}x{}", width, height);
        self.mark_changed();
        Ok(())
    }

    /// Rebuilds the layers at a new cell size. Grid and history are kept.
    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), EditorError> {
        let metrics = CellMetrics::new(cell_size, self.compositor.metrics().gutter);
        if metrics == self.compositor.metrics() {
            return Ok(());
        }
        self.compositor
            .rebuild(&self.grid, &self.palette, metrics, &mut self.guide_cache)?;
        self.state = DragState::Idle;
        debug!("Cell size set to {}px", cell_size);
        Ok(())
    }
}
