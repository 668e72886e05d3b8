use crate::draw::Cell;
use crate::grid::ColorIndex;
use crate::input::events::{Dispatch, PointerEvent, StrokeKind};
use crate::input::tool::InputMode;
use log::debug;

use super::{DragState, EditorState};

impl EditorState {
    /// Resolves a surface pixel position to a cell, clamped to the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> (usize, usize) {
        let metrics = self.compositor.metrics();
        // Clamp before narrowing; far off-canvas pixels exceed i32 cells.
        let clamp_axis = |cell: i64, len: usize| cell.clamp(0, (len as i64 - 1).max(0)) as usize;
        (
            clamp_axis(metrics.cell_at(x), self.grid.width()),
            clamp_axis(metrics.cell_at(y), self.grid.height()),
        )
    }

    fn stroke_color(&self, stroke: StrokeKind) -> ColorIndex {
        match stroke {
            StrokeKind::Paint => self.active_color,
            StrokeKind::Erase => 0,
        }
    }

    fn preview_shape(&mut self, mode: InputMode, start: Cell, end: Cell, previous: Option<Cell>) {
        if let Some(shape) = mode.shape(start, end) {
            self.compositor.show_preview(&shape.cells(), previous);
        }
    }

    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Primary button paints the active color, the eraser mask paints background
    /// - Any other button mask is rejected with [`Dispatch::Suppressed`]
    /// - Pixel mode paints the pressed cell immediately; shape modes start a preview
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Dispatch {
        let Some(stroke) = StrokeKind::from_buttons(event.buttons) else {
            debug!("Rejected pointer press with buttons {:#x}", event.buttons);
            return Dispatch::Suppressed;
        };
        if self.is_dragging() {
            return Dispatch::Ignored;
        }

        let (x, y) = self.cell_at(event.x, event.y);
        let start_color = self.grid.get(x, y).unwrap_or(0);
        let mode = self.mode;
        self.state = DragState::Dragging {
            mode,
            stroke,
            start_x: x,
            start_y: y,
            start_color,
            current_x: x,
            current_y: y,
        };

        if mode == InputMode::Pixel {
            let color = self.stroke_color(stroke);
            if self.write_cell(x, y, color) {
                self.mark_changed();
            }
        } else {
            let anchor = (x as i32, y as i32);
            self.preview_shape(mode, anchor, anchor, None);
        }
        Dispatch::Handled
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Pixel mode: paints every coalesced sample that lands on a new cell
    /// - Shape modes: re-rasterizes start → latest cell into the preview layer
    /// - Samples resolving to the current cell are skipped
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Dispatch {
        let DragState::Dragging {
            mode,
            stroke,
            start_x,
            start_y,
            current_x,
            current_y,
            ..
        } = self.state
        else {
            return Dispatch::Ignored;
        };

        if mode == InputMode::Pixel {
            let color = self.stroke_color(stroke);
            let mut current = (current_x, current_y);
            let mut moved = false;
            let mut changed = false;
            for (sx, sy) in event.samples() {
                let cell = self.cell_at(sx, sy);
                if cell == current {
                    continue;
                }
                current = cell;
                moved = true;
                changed |= self.write_cell(cell.0, cell.1, color);
            }
            self.set_current(current);
            if changed {
                self.mark_changed();
            }
            return if moved {
                Dispatch::Handled
            } else {
                Dispatch::Ignored
            };
        }

        let latest = self.cell_at(event.x, event.y);
        if latest == (current_x, current_y) {
            return Dispatch::Ignored;
        }
        self.set_current(latest);
        self.preview_shape(
            mode,
            (start_x as i32, start_y as i32),
            (latest.0 as i32, latest.1 as i32),
            Some((current_x as i32, current_y as i32)),
        );
        Dispatch::Handled
    }

    /// Processes a pointer release, finishing the drag.
    ///
    /// # Behavior
    /// - Pixel mode: releasing on the start cell when it held ink before the
    ///   press clears it (tap to toggle)
    /// - Shape modes: commits start → release cells in the foreground color
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Dispatch {
        let DragState::Dragging {
            mode,
            start_x,
            start_y,
            start_color,
            ..
        } = self.state
        else {
            return Dispatch::Ignored;
        };
        let end = self.cell_at(event.x, event.y);
        self.state = DragState::Idle;

        if mode == InputMode::Pixel {
            if end == (start_x, start_y) && start_color != 0 && self.write_cell(start_x, start_y, 0)
            {
                self.mark_changed();
            }
        } else {
            self.compositor.clear_preview();
            let start = (start_x as i32, start_y as i32);
            let cells = mode
                .shape(start, (end.0 as i32, end.1 as i32))
                .map(|shape| shape.cells())
                .unwrap_or_default();
            let mut changed = false;
            for (x, y) in cells {
                if x >= 0 && y >= 0 {
                    changed |= self.write_cell(x as usize, y as usize, 1);
                }
            }
            if changed {
                debug!("Committed {} from {:?} to {:?}", mode, start, end);
                self.mark_changed();
            }
        }

        self.sync_hover();
        Dispatch::Handled
    }

    /// Abandons the drag. Cells already painted stay; any preview is removed.
    pub fn pointer_cancel(&mut self) {
        if !self.is_dragging() {
            return;
        }
        self.state = DragState::Idle;
        self.compositor.clear_preview();
        self.sync_hover();
    }

    /// Pointer entered the canvas. Reveals the inset editing layer unless a
    /// drag is in progress.
    pub fn pointer_enter(&mut self) {
        self.pointer_inside = true;
        if !self.is_dragging() {
            self.compositor.set_hover(true);
        }
    }

    /// Pointer left the canvas. A captured drag keeps its hover state.
    pub fn pointer_leave(&mut self) {
        self.pointer_inside = false;
        if !self.is_dragging() {
            self.compositor.set_hover(false);
        }
    }

    fn set_current(&mut self, cell: (usize, usize)) {
        if let DragState::Dragging {
            current_x,
            current_y,
            ..
        } = &mut self.state
        {
            *current_x = cell.0;
            *current_y = cell.1;
        }
    }

    fn sync_hover(&mut self) {
        self.compositor.set_hover(self.pointer_inside);
    }
}
