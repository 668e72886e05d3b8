//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, hex string or RGB(A) values.
///
/// # Examples
/// ```toml
/// # Named color
/// colors = ["transparent", "black"]
///
/// # Hex notation
/// ring_color = "#ffffff"
///
/// # Custom RGB color (0-255 per component)
/// dot_color = [30, 136, 229]
///
/// # RGBA with alpha 0-255
/// colors = ["transparent", [0, 0, 0, 128]]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, white, black, transparent) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha] where each component is 0-255
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are mapped through [`name_to_color`]. Unknown names fall
    /// back to black with a warning. Arrays are converted from 0-255 to 0.0-1.0.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgba8(*r, *g, *b, 255),
            ColorSpec::Rgba([r, g, b, a]) => Color::from_rgba8(*r, *g, *b, *a),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}
