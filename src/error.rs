//! Error type for the fallible editor entry points.

use crate::grid::ColorIndex;
use thiserror::Error;

/// Errors returned by editor construction and whole-grid operations.
///
/// Interactive input never produces these; pointer coordinates are clamped
/// and unsupported requests are ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("template is {actual_width}x{actual_height} but the grid is {width}x{height}")]
    TemplateSize {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("color index {index} at ({x}, {y}) is outside the {palette_len}-entry palette")]
    ColorOutOfPalette {
        x: usize,
        y: usize,
        index: ColorIndex,
        palette_len: usize,
    },

    #[error("color index {index} is outside the {palette_len}-entry palette")]
    UnknownColor {
        index: ColorIndex,
        palette_len: usize,
    },

    #[error("palette needs a background and a foreground entry, got {len}")]
    PaletteTooSmall { len: usize },

    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("failed to allocate a {width}x{height} pixel surface")]
    Surface { width: u32, height: u32 },
}
