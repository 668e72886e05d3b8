//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{BLACK, Guide, Palette};
use crate::input::InputMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas geometry.
///
/// Grid dimensions are fixed for an editing session; the CLI can override
/// them per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Grid width in cells (valid range: 1 - 1024)
    #[serde(default = "default_grid_size")]
    pub width: usize,

    /// Grid height in cells (valid range: 1 - 1024)
    #[serde(default = "default_grid_size")]
    pub height: usize,

    /// Size of one cell in pixels (valid range: 2 - 64)
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// Width of the grid lines between cells in pixels (valid range: 0 - 4)
    #[serde(default = "default_gutter")]
    pub gutter: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            cell_size: default_cell_size(),
            gutter: default_gutter(),
        }
    }
}

/// Indexed palette.
///
/// Entry 0 is the background, entry 1 the foreground written by the shape
/// tools. Lists shorter than two entries are padded with black.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PaletteConfig {
    #[serde(default = "default_palette_colors")]
    pub colors: Vec<ColorSpec>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: default_palette_colors(),
        }
    }
}

impl PaletteConfig {
    pub fn to_palette(&self) -> Palette {
        let mut colors: Vec<_> = self.colors.iter().map(ColorSpec::to_color).collect();
        if colors.len() < 2 {
            log::warn!(
                "Palette has {} color(s), padding with black to two entries",
                colors.len()
            );
            colors.resize(2, BLACK);
        }
        Palette::new(colors)
    }
}

/// Editor behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditorConfig {
    /// Input mode active when the editor opens
    #[serde(default)]
    pub input_mode: InputMode,

    /// Render transparent cells as solid white instead of a checkerboard while hovering
    #[serde(default)]
    pub disable_transparency: bool,

    /// Quiet period in milliseconds before edits become one undo step (valid range: 0 - 10000)
    #[serde(default = "default_history_debounce_ms")]
    pub history_debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            input_mode: InputMode::default(),
            disable_transparency: false,
            history_debounce_ms: default_history_debounce_ms(),
        }
    }
}

/// Shape-tool preview marker colors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PreviewConfig {
    /// Outer disc of the marker
    #[serde(default = "default_ring_color")]
    pub ring_color: ColorSpec,

    /// Inner accent dot
    #[serde(default = "default_dot_color")]
    pub dot_color: ColorSpec,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            ring_color: default_ring_color(),
            dot_color: default_dot_color(),
        }
    }
}

/// Extra alignment guide drawn beneath the grid for one canvas size.
///
/// # Example TOML
/// ```toml
/// [[guides]]
/// name = "Safe area"
/// width = 16
/// height = 16
/// color = "#0f0"
/// opacity = 0.4
/// lines = [[1, 1], [15, 1], [15, 15], [1, 15], [1, 1]]
/// dash = [4.0, 2.0]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideConfig {
    pub name: String,

    /// Grid width this guide applies to
    pub width: usize,

    /// Grid height this guide applies to
    pub height: usize,

    #[serde(default = "default_guide_color")]
    pub color: ColorSpec,

    /// Stroke opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_guide_opacity")]
    pub opacity: f64,

    /// Polyline vertices in cell units
    pub lines: Vec<[f32; 2]>,

    /// Alternating dash/gap lengths in pixels; empty for a solid line
    #[serde(default)]
    pub dash: Vec<f32>,

    #[serde(default)]
    pub dash_offset: f32,
}

impl GuideConfig {
    pub fn to_guide(&self) -> Guide {
        Guide {
            name: self.name.clone(),
            size: Some((self.width, self.height)),
            color: self.color.to_color(),
            opacity: self.opacity,
            lines: self.lines.iter().map(|[x, y]| (*x, *y)).collect(),
            dash: self.dash.clone(),
            dash_offset: self.dash_offset,
        }
    }
}

fn default_grid_size() -> usize {
    24
}

fn default_cell_size() -> u32 {
    10
}

fn default_gutter() -> u32 {
    1
}

fn default_palette_colors() -> Vec<ColorSpec> {
    vec![ColorSpec::from("transparent"), ColorSpec::from("black")]
}

fn default_history_debounce_ms() -> u64 {
    1000
}

fn default_ring_color() -> ColorSpec {
    ColorSpec::from("white")
}

fn default_dot_color() -> ColorSpec {
    ColorSpec::Rgb([30, 136, 229])
}

fn default_guide_color() -> ColorSpec {
    ColorSpec::from("blue")
}

fn default_guide_opacity() -> f64 {
    0.4
}
