//! Indexed-color pixel grid editing engine.
//!
//! Exposes the grid model and its transforms, the tool rasterizers, the
//! layered tiny-skia compositor and the pointer-driven editor session so hosts
//! (the bundled script CLI, GUI shells, tests) can drive one editing session
//! and present its visible surface.

pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod history;
pub mod input;
pub mod outline;
pub mod script;
pub mod util;

pub use config::Config;
pub use draw::{CellMetrics, Color, Compositor, GuideCache, LayerStyle, Palette, Shape};
pub use error::EditorError;
pub use grid::{ChangeSet, ColorIndex, Grid, PixelEdit};
pub use history::History;
pub use input::{
    Dispatch, EditorListener, EditorOptions, EditorState, InputMode, Interaction, PointerEvent,
};
pub use outline::{OutlineTracer, RowRunTracer};
