//! RGBA color type, predefined color constants and the indexed palette.

use crate::grid::ColorIndex;
use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use pixgrid::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// assert!(semi_transparent_blue.a < red.a);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Returns the same color with its alpha scaled by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: (self.a * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Returns the same color forced fully opaque.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Converts to a tiny-skia color, clamping out-of-range components.
    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0) as f32,
            self.g.clamp(0.0, 1.0) as f32,
            self.b.clamp(0.0, 1.0) as f32,
            self.a.clamp(0.0, 1.0) as f32,
        )
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Fully transparent color, the default background palette entry
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

/// Grid separator lines drawn on the base layer
pub const GRID_LINE: Color = Color {
    r: 0.867,
    g: 0.867,
    b: 0.867,
    a: 1.0,
};

/// Light checkerboard square shown behind transparent cells while editing
pub const CHECKER_LIGHT: Color = Color {
    r: 0.96,
    g: 0.96,
    b: 0.96,
    a: 1.0,
};

/// Dark checkerboard square shown behind transparent cells while editing
pub const CHECKER_DARK: Color = Color {
    r: 0.86,
    g: 0.86,
    b: 0.86,
    a: 1.0,
};

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse palette entries and guide colors.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "white", "black", "transparent"
/// - hex notation: `#rgb`, `#rrggbb` or `#rrggbbaa`
pub fn name_to_color(name: &str) -> Option<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" | "none" => Some(TRANSPARENT),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut parts = hex.chars().map(|c| channel(&format!("{c}{c}")));
            Some(Color::from_rgba8(
                parts.next()??,
                parts.next()??,
                parts.next()??,
                255,
            ))
        }
        6 | 8 => {
            let r = channel(hex.get(0..2)?)?;
            let g = channel(hex.get(2..4)?)?;
            let b = channel(hex.get(4..6)?)?;
            let a = match hex.get(6..8) {
                Some(a) => channel(a)?,
                None => 255,
            };
            Some(Color::from_rgba8(r, g, b, a))
        }
        _ => None,
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Ordered list of paint values addressed by [`ColorIndex`].
///
/// Index 0 is the conventional background. The palette only resolves
/// indices to colors; it does not decide what is erasable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    /// Two-entry palette: transparent background and black foreground.
    fn default() -> Self {
        Self {
            colors: vec![TRANSPARENT, BLACK],
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Whether `index` addresses an entry of this palette.
    pub fn contains(&self, index: ColorIndex) -> bool {
        (index as usize) < self.colors.len()
    }

    /// Resolves an index to its paint value.
    pub fn get(&self, index: ColorIndex) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_background_plus_foreground() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 2);
        assert!(palette.get(0).unwrap().is_transparent());
        assert_eq!(palette.get(1), Some(BLACK));
        assert!(palette.get(2).is_none());
        assert!(!palette.contains(2));
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(name_to_color("Black"), Some(BLACK));
        assert_eq!(name_to_color("TRANSPARENT"), Some(TRANSPARENT));
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn hex_notation_parses_short_and_long_forms() {
        assert_eq!(name_to_color("#F00"), Some(RED));
        assert_eq!(name_to_color("#0000ff"), Some(BLUE));
        let translucent = name_to_color("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
        assert!(name_to_color("#12").is_none());
        assert!(name_to_color("#zzz").is_none());
    }

    #[test]
    fn rgba8_and_opacity_scale_alpha() {
        let color = Color::from_rgba8(255, 0, 0, 255).with_opacity(0.25);
        assert_eq!(color.r, 1.0);
        assert!((color.a - 0.25).abs() < f64::EPSILON);
        assert_eq!(color.opaque().a, 1.0);
    }
}
