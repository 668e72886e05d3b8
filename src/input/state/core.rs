//! Editor session state and construction.

use crate::config::Config;
use crate::draw::{CellMetrics, Compositor, Guide, GuideCache, LayerStyle, Palette};
use crate::error::EditorError;
use crate::grid::{ColorIndex, Grid};
use crate::history::{DEFAULT_DEBOUNCE, History};
use crate::input::events::StrokeKind;
use crate::input::tool::InputMode;
use crate::outline::{OutlineTracer, RowRunTracer};
use crate::util::Rect;
use std::time::{Duration, Instant};
use tiny_skia::Pixmap;

/// Pointer drag state machine.
///
/// Created at pointer-down, updated on every move that resolves to a new
/// cell, and dropped at pointer-up or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No button held
    Idle,
    /// Button held over the canvas
    Dragging {
        /// Mode captured at press; switching modes mid-drag does not affect it
        mode: InputMode,
        stroke: StrokeKind,
        start_x: usize,
        start_y: usize,
        /// Color of the start cell before the press painted it
        start_color: ColorIndex,
        current_x: usize,
        current_y: usize,
    },
}

/// Coarse interaction state reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Hovering,
    Dragging,
}

/// Observer of committed grid changes.
///
/// `grid_changed` fires right after every operation that modified the grid.
/// `outline_changed` fires once the history quiet period ends, with the
/// traced outline of the grid at that time.
pub trait EditorListener {
    fn grid_changed(&mut self, _grid: &Grid) {}

    fn outline_changed(&mut self, _grid: &Grid, _outline: &str) {}
}

/// Construction parameters for an [`EditorState`].
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub width: usize,
    pub height: usize,
    pub metrics: CellMetrics,
    pub palette: Palette,
    pub input_mode: InputMode,
    pub style: LayerStyle,
    pub history_debounce: Duration,
    /// Guides appended to the built-in catalog
    pub extra_guides: Vec<Guide>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            width: 24,
            height: 24,
            metrics: CellMetrics::new(10, 1),
            palette: Palette::default(),
            input_mode: InputMode::Pixel,
            style: LayerStyle::default(),
            history_debounce: DEFAULT_DEBOUNCE,
            extra_guides: Vec::new(),
        }
    }
}

impl From<&Config> for EditorOptions {
    fn from(config: &Config) -> Self {
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            metrics: CellMetrics::new(config.canvas.cell_size, config.canvas.gutter),
            palette: config.palette.to_palette(),
            input_mode: config.editor.input_mode,
            style: LayerStyle {
                disable_transparency: config.editor.disable_transparency,
                marker_ring: config.preview.ring_color.to_color(),
                marker_dot: config.preview.dot_color.to_color(),
            },
            history_debounce: Duration::from_millis(config.editor.history_debounce_ms),
            extra_guides: config.guides.iter().map(|guide| guide.to_guide()).collect(),
        }
    }
}

/// One editing session: the grid, its palette, the layer surfaces, history
/// and the pointer state machine.
///
/// All grid writes go through the compositor so the layers never disagree
/// with the grid. Time only enters through [`EditorState::poll`], which the
/// host calls from its event loop.
pub struct EditorState {
    pub(crate) grid: Grid,
    pub(crate) palette: Palette,
    pub(crate) compositor: Compositor,
    pub(crate) guide_cache: GuideCache,
    pub(crate) history: History,
    pub(crate) mode: InputMode,
    /// Palette index painted by the primary button in pixel mode
    pub(crate) active_color: ColorIndex,
    /// Current drag state machine
    pub state: DragState,
    /// Whether the pointer is over the canvas, tracked even while dragging
    pub(crate) pointer_inside: bool,
    listeners: Vec<Box<dyn EditorListener>>,
    tracer: Box<dyn OutlineTracer>,
}

impl EditorState {
    /// Creates a blank session.
    ///
    /// # Errors
    /// Fails for a zero-sized grid, a palette without a foreground entry, or
    /// when the layer surfaces cannot be allocated.
    pub fn new(options: EditorOptions) -> Result<Self, EditorError> {
        if options.width == 0 || options.height == 0 {
            return Err(EditorError::ZeroDimension {
                width: options.width,
                height: options.height,
            });
        }
        if options.palette.len() < 2 {
            return Err(EditorError::PaletteTooSmall {
                len: options.palette.len(),
            });
        }

        let grid = Grid::new(options.width, options.height);
        let mut guide_cache = GuideCache::default();
        guide_cache.extend_catalog(options.extra_guides);
        let compositor = Compositor::new(
            &grid,
            &options.palette,
            options.metrics,
            options.style,
            &mut guide_cache,
        )?;
        let history = History::new(&grid, options.history_debounce);

        log::debug!(
            "Editor session {}x{} at {}px, mode {}",
            options.width,
            options.height,
            options.metrics.cell_size,
            options.input_mode
        );

        Ok(Self {
            grid,
            palette: options.palette,
            compositor,
            guide_cache,
            history,
            mode: options.input_mode,
            active_color: 1,
            state: DragState::Idle,
            pointer_inside: false,
            listeners: Vec::new(),
            tracer: Box::new(RowRunTracer),
        })
    }

    /// Creates a session from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, EditorError> {
        Self::new(EditorOptions::from(config))
    }

    /// Replaces the grid-to-outline function.
    pub fn set_tracer(&mut self, tracer: impl OutlineTracer + 'static) {
        self.tracer = Box::new(tracer);
    }

    pub fn add_listener(&mut self, listener: impl EditorListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Read-only view of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn active_color(&self) -> ColorIndex {
        self.active_color
    }

    pub fn metrics(&self) -> CellMetrics {
        self.compositor.metrics()
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn guide_cache(&self) -> &GuideCache {
        &self.guide_cache
    }

    /// The composited surface to present.
    pub fn visible(&self) -> &Pixmap {
        self.compositor.visible()
    }

    /// Visible-surface rectangles repainted since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.compositor.take_dirty_regions()
    }

    pub fn interaction(&self) -> Interaction {
        match self.state {
            DragState::Dragging { .. } => Interaction::Dragging,
            DragState::Idle if self.compositor.is_hovering() => Interaction::Hovering,
            DragState::Idle => Interaction::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn has_undo(&self) -> bool {
        self.history.has_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.history.has_redo()
    }

    /// Whether edits are waiting for the history quiet period.
    pub fn has_pending_history(&self) -> bool {
        self.history.is_pending()
    }

    /// When [`EditorState::poll`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.history.deadline()
    }

    /// Traces the current grid with the configured outline function.
    pub fn outline(&self) -> String {
        self.tracer.trace(&self.grid)
    }

    /// Fires the history alarm if its quiet period ended by `now`.
    ///
    /// Pending edits become one undo step (dropped if they cancelled out) and
    /// listeners receive the new outline. Returns true when the alarm fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.history.fire(now) {
            return false;
        }
        self.history.commit(&self.grid);
        self.notify_outline();
        true
    }

    /// Commits pending edits immediately instead of waiting for the alarm.
    ///
    /// Returns true when a new undo step was pushed.
    pub fn flush_history(&mut self) -> bool {
        if !self.history.is_pending() {
            return false;
        }
        let pushed = self.history.commit(&self.grid);
        self.notify_outline();
        pushed
    }

    /// Writes one cell through the compositor. Returns true if it changed.
    pub(crate) fn write_cell(&mut self, x: usize, y: usize, color: ColorIndex) -> bool {
        self.compositor
            .paint_cell(&mut self.grid, &self.palette, x, y, color)
            .is_some()
    }

    /// Applies a whole grid of the same size through the compositor.
    pub(crate) fn write_grid(&mut self, next: &Grid) -> bool {
        self.compositor
            .paint_region(&mut self.grid, &self.palette, next)
            .is_some()
    }

    /// Bookkeeping after any operation that changed the grid.
    pub(crate) fn mark_changed(&mut self) {
        self.history.note_change(Instant::now());
        for listener in &mut self.listeners {
            listener.grid_changed(&self.grid);
        }
    }

    fn notify_outline(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let outline = self.tracer.trace(&self.grid);
        for listener in &mut self.listeners {
            listener.outline_changed(&self.grid, &outline);
        }
    }
}
