//! Rasterizers, colors and the tiny-skia layer compositor.
//!
//! This module defines the drawing side of the editor:
//! - [`Color`] / [`Palette`]: RGBA paint values addressed by color index
//! - [`Shape`]: tool rasterizers mapping two anchors to a set of cells
//! - [`GuideCache`]: memoized base layer with grid lines and alignment guides
//! - [`Compositor`]: the off-screen layers and the visible surface

pub mod color;
pub mod dirty;
pub mod guides;
pub mod layers;
pub mod render;
pub mod shape;

pub use color::{Color, Palette};
pub use dirty::DirtyTracker;
pub use guides::{BaseKey, Guide, GuideCache};
pub use layers::{CellMetrics, Compositor, LayerKind, LayerStyle};
pub use shape::{Cell, Shape};

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, RED, TRANSPARENT, WHITE};
