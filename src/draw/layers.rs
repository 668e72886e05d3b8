//! Layer compositor keeping the visible surface in sync with the grid.
//!
//! Four off-screen surfaces feed the visible one:
//! - `base`: grid lines and guides, shared through the [`GuideCache`]
//! - `edit`: cells drawn inset so grid lines show between them (hover view)
//! - `no_edit`: cells drawn flush, covering their trailing gutter (idle view)
//! - `preview`: transient tool markers, never written to the grid
//!
//! Visible = `base` + (`edit` or `no_edit`) + `preview`. Every mutation
//! recomposites only the affected pixel region and records it in the
//! [`DirtyTracker`].

use super::color::{CHECKER_DARK, CHECKER_LIGHT, Color, Palette, WHITE};
use super::dirty::DirtyTracker;
use super::guides::{BaseKey, GuideCache};
use super::render;
use super::shape::Cell;
use crate::error::EditorError;
use crate::grid::{ColorIndex, Grid};
use crate::util::Rect;
use tiny_skia::Pixmap;

/// Pixel geometry of one grid cell.
///
/// Cell `(x, y)` starts at `gutter + x * pitch` and is `cell_size` wide. The
/// gutter lines sit at `k * pitch` for every `k` in `0..=columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_size: u32,
    pub gutter: u32,
}

impl CellMetrics {
    pub fn new(cell_size: u32, gutter: u32) -> Self {
        Self { cell_size, gutter }
    }

    pub fn pitch(&self) -> u32 {
        self.cell_size + self.gutter
    }

    /// Pixel size of a canvas holding `columns` x `rows` cells.
    pub fn canvas_size(&self, columns: usize, rows: usize) -> (u32, u32) {
        let pitch = self.pitch();
        (
            columns as u32 * pitch + self.gutter,
            rows as u32 * pitch + self.gutter,
        )
    }

    pub fn cell_origin(&self, x: usize, y: usize) -> (i32, i32) {
        let pitch = self.pitch() as i32;
        let gutter = self.gutter as i32;
        (gutter + x as i32 * pitch, gutter + y as i32 * pitch)
    }

    /// The cell's own pixels, leaving the surrounding grid lines uncovered.
    pub fn inset_rect(&self, x: usize, y: usize) -> Option<Rect> {
        let (left, top) = self.cell_origin(x, y);
        let size = self.cell_size as i32;
        Rect::new(left, top, size, size)
    }

    /// The cell plus its trailing gutter; flush rects of adjacent cells tile.
    pub fn flush_rect(&self, x: usize, y: usize) -> Option<Rect> {
        let (left, top) = self.cell_origin(x, y);
        let pitch = self.pitch() as i32;
        Rect::new(left, top, pitch, pitch)
    }

    pub fn cell_center(&self, x: usize, y: usize) -> (f32, f32) {
        let (left, top) = self.cell_origin(x, y);
        let half = self.cell_size as f32 / 2.0;
        (left as f32 + half, top as f32 + half)
    }

    /// Cell index under a surface pixel coordinate. May be out of range.
    pub fn cell_at(&self, pixel: f64) -> i64 {
        let pitch = self.pitch().max(1) as f64;
        ((pixel - self.gutter as f64) / pitch).floor() as i64
    }

    /// Pixel rectangle covering a rectangle of cells and the grid lines around it.
    pub fn cells_to_pixels(&self, cells: Rect) -> Option<Rect> {
        let pitch = self.pitch() as i32;
        let gutter = self.gutter as i32;
        Rect::new(
            cells.x * pitch,
            cells.y * pitch,
            cells.width * pitch + gutter,
            cells.height * pitch + gutter,
        )
    }
}

/// Appearance options for the editing surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    /// Draw transparent cells as solid white instead of a checkerboard.
    pub disable_transparency: bool,
    pub marker_ring: Color,
    pub marker_dot: Color,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            disable_transparency: false,
            marker_ring: WHITE,
            marker_dot: Color::from_rgba8(0x1e, 0x88, 0xe5, 0xff),
        }
    }
}

/// Identifies one of the off-screen surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Base,
    Edit,
    NoEdit,
    Preview,
}

/// Owns the layer surfaces of one editor session.
#[derive(Debug)]
pub struct Compositor {
    metrics: CellMetrics,
    columns: usize,
    rows: usize,
    style: LayerStyle,
    base: Pixmap,
    edit: Pixmap,
    no_edit: Pixmap,
    preview: Pixmap,
    visible: Pixmap,
    hovering: bool,
    /// Cell bounds of the markers currently on the preview surface
    preview_bounds: Option<Rect>,
    dirty: DirtyTracker,
}

fn blank_surface(width: u32, height: u32) -> Result<Pixmap, EditorError> {
    Pixmap::new(width, height).ok_or(EditorError::Surface { width, height })
}

impl Compositor {
    /// Allocates every surface for `grid` and paints its current content.
    pub fn new(
        grid: &Grid,
        palette: &Palette,
        metrics: CellMetrics,
        style: LayerStyle,
        cache: &mut GuideCache,
    ) -> Result<Self, EditorError> {
        let (width, height) = metrics.canvas_size(grid.width(), grid.height());
        let base = cache
            .base_layer(BaseKey::new(grid.width(), grid.height(), metrics))?
            .clone();
        let mut compositor = Self {
            metrics,
            columns: grid.width(),
            rows: grid.height(),
            style,
            base,
            edit: blank_surface(width, height)?,
            no_edit: blank_surface(width, height)?,
            preview: blank_surface(width, height)?,
            visible: blank_surface(width, height)?,
            hovering: false,
            preview_bounds: None,
            dirty: DirtyTracker::new(),
        };
        compositor.repaint_all(grid, palette);
        Ok(compositor)
    }

    /// Rebuilds every surface for new dimensions or a new cell size.
    ///
    /// The base layer comes from `cache` when the geometry was seen before.
    /// Hover state carries over; any preview is dropped.
    pub fn rebuild(
        &mut self,
        grid: &Grid,
        palette: &Palette,
        metrics: CellMetrics,
        cache: &mut GuideCache,
    ) -> Result<(), EditorError> {
        let hovering = self.hovering;
        *self = Self::new(grid, palette, metrics, self.style, cache)?;
        self.hovering = hovering;
        self.blit(self.full_rect());
        self.dirty.mark_full();
        Ok(())
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn style(&self) -> LayerStyle {
        self.style
    }

    /// The composited surface a host presents.
    pub fn visible(&self) -> &Pixmap {
        &self.visible
    }

    pub fn layer(&self, kind: LayerKind) -> &Pixmap {
        match kind {
            LayerKind::Base => &self.base,
            LayerKind::Edit => &self.edit,
            LayerKind::NoEdit => &self.no_edit,
            LayerKind::Preview => &self.preview,
        }
    }

    /// Drains the visible-surface rectangles repainted since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let (width, height) = (self.visible.width() as i32, self.visible.height() as i32);
        self.dirty.take_regions(width, height)
    }

    /// Writes one cell into the grid and both cell layers, then recomposites
    /// the cell and a one-cell halo.
    ///
    /// Returns the previous color, or `None` when the cell is out of range or
    /// already holds `color` (nothing is repainted in either case).
    ///
    /// # Panics
    /// When `color` is not an index of `palette`.
    pub fn paint_cell(
        &mut self,
        grid: &mut Grid,
        palette: &Palette,
        x: usize,
        y: usize,
        color: ColorIndex,
    ) -> Option<ColorIndex> {
        assert!(
            palette.contains(color),
            "color index {color} outside {}-entry palette",
            palette.len()
        );
        if grid.get(x, y)? == color {
            return None;
        }
        let old = grid.set(x, y, color)?;
        self.draw_cell(palette, x, y, color);
        let halo = Rect::new(x as i32, y as i32, 1, 1).map(|cell| cell.inflate(1));
        if let Some(region) = halo.and_then(|cells| self.metrics.cells_to_pixels(cells)) {
            self.blit(region);
        }
        Some(old)
    }

    /// Applies every cell of `template` that differs from `grid`.
    ///
    /// Returns the cell bounds of everything that changed.
    pub fn paint_region(&mut self, grid: &mut Grid, palette: &Palette, template: &Grid) -> Option<Rect> {
        let mut changed = None;
        for (x, y, color) in template.iter() {
            if self.paint_cell(grid, palette, x, y, color).is_some() {
                changed = Rect::union_optional(changed, Rect::new(x as i32, y as i32, 1, 1));
            }
        }
        if let Some(bounds) = changed {
            log::debug!(
                "Region repaint covered {}x{} cells at ({}, {})",
                bounds.width,
                bounds.height,
                bounds.x,
                bounds.y
            );
        }
        changed
    }

    /// Switches between the inset (hovering) and flush cell layers.
    ///
    /// Recomposites the whole visible surface when the state changes.
    pub fn set_hover(&mut self, editing: bool) {
        if self.hovering == editing {
            return;
        }
        self.hovering = editing;
        self.blit(self.full_rect());
    }

    /// Replaces the preview markers with one marker per cell.
    ///
    /// The recomposited region covers the new markers, the previous cursor
    /// cell and whatever the previous preview occupied, so stale markers are
    /// always erased.
    pub fn show_preview(&mut self, cells: &[Cell], previous_cursor: Option<Cell>) {
        let in_range: Vec<Cell> = cells
            .iter()
            .copied()
            .filter(|&(x, y)| self.contains_cell(x, y))
            .collect();

        let full = self.full_rect();
        render::clear_rect(&mut self.preview, full);
        let radius = self.metrics.cell_size as f32 * 0.35;
        for &(x, y) in &in_range {
            let (cx, cy) = self.metrics.cell_center(x as usize, y as usize);
            render::render_marker(
                &mut self.preview,
                cx,
                cy,
                radius,
                self.style.marker_ring,
                self.style.marker_dot,
            );
        }

        let markers = Rect::covering(in_range.iter().copied());
        let cursor = previous_cursor.and_then(|(x, y)| Rect::new(x, y, 1, 1));
        let stale = self.preview_bounds;
        let region = Rect::union_optional(Rect::union_optional(markers, cursor), stale);
        self.preview_bounds = markers;
        if let Some(region) = region.and_then(|cells| self.metrics.cells_to_pixels(cells)) {
            self.blit(region);
        }
    }

    /// Removes every preview marker.
    pub fn clear_preview(&mut self) {
        let Some(stale) = self.preview_bounds.take() else {
            return;
        };
        let full = self.full_rect();
        render::clear_rect(&mut self.preview, full);
        if let Some(region) = self.metrics.cells_to_pixels(stale) {
            self.blit(region);
        }
    }

    pub fn has_preview(&self) -> bool {
        self.preview_bounds.is_some()
    }

    fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows
    }

    fn full_rect(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.visible.width() as i32,
            height: self.visible.height() as i32,
        }
    }

    fn repaint_all(&mut self, grid: &Grid, palette: &Palette) {
        for (x, y, color) in grid.iter() {
            self.draw_cell(palette, x, y, color);
        }
        self.blit(self.full_rect());
        self.dirty.mark_full();
    }

    /// Draws a cell into the edit and no-edit layers without touching the grid.
    fn draw_cell(&mut self, palette: &Palette, x: usize, y: usize, color: ColorIndex) {
        let paint = palette.get(color).unwrap_or(WHITE);

        if let Some(inset) = self.metrics.inset_rect(x, y) {
            if !paint.is_transparent() {
                render::fill_rect(&mut self.edit, inset, paint);
            } else if self.style.disable_transparency {
                render::fill_rect(&mut self.edit, inset, WHITE);
            } else {
                let square = (self.metrics.cell_size as i32 / 2).max(1);
                render::fill_checkerboard(&mut self.edit, inset, square, CHECKER_LIGHT, CHECKER_DARK);
            }
        }

        if let Some(flush) = self.metrics.flush_rect(x, y) {
            render::fill_rect(&mut self.no_edit, flush, paint);
        }
    }

    /// Recomposites `region` (surface pixels) of the visible surface.
    fn blit(&mut self, region: Rect) {
        let (width, height) = (self.visible.width() as i32, self.visible.height() as i32);
        let Some(region) = region.clamp_to_bounds(width, height) else {
            return;
        };
        let hover_layer = if self.hovering { &self.edit } else { &self.no_edit };
        render::clear_rect(&mut self.visible, region);
        render::composite_region(&mut self.visible, &self.base, region);
        render::composite_region(&mut self.visible, hover_layer, region);
        render::composite_region(&mut self.visible, &self.preview, region);
        self.dirty.mark_rect(region);
    }
}
