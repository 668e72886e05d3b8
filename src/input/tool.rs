//! Input mode selection.

use crate::draw::{Cell, Shape};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input mode selection.
///
/// The active mode determines what a drag does: `Pixel` paints every cell the
/// pointer crosses, the shape modes preview the rasterized shape while
/// dragging and commit it on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// Freehand cell painting (default)
    #[default]
    Pixel,
    /// Straight line between press and release cells
    Line,
    /// Filled rectangle spanned by the two corners
    Rectangle,
    /// Rectangle perimeter only
    RectangleOutline,
    /// Filled ellipse inscribed in the corner box
    Ellipse,
    /// Ellipse ring inscribed in the corner box
    EllipseOutline,
}

impl InputMode {
    pub const ALL: [InputMode; 6] = [
        InputMode::Pixel,
        InputMode::Line,
        InputMode::Rectangle,
        InputMode::RectangleOutline,
        InputMode::Ellipse,
        InputMode::EllipseOutline,
    ];

    pub fn is_shape(self) -> bool {
        self != InputMode::Pixel
    }

    /// Shape rasterized for a drag from `start` to `end`; `None` for `Pixel`.
    pub fn shape(self, start: Cell, end: Cell) -> Option<Shape> {
        match self {
            InputMode::Pixel => None,
            InputMode::Line => Some(Shape::Line { start, end }),
            InputMode::Rectangle => Some(Shape::Rect { start, end }),
            InputMode::RectangleOutline => Some(Shape::RectOutline { start, end }),
            InputMode::Ellipse => Some(Shape::Ellipse { start, end }),
            InputMode::EllipseOutline => Some(Shape::EllipseOutline { start, end }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Pixel => "pixel",
            InputMode::Line => "line",
            InputMode::Rectangle => "rectangle",
            InputMode::RectangleOutline => "rectangle-outline",
            InputMode::Ellipse => "ellipse",
            InputMode::EllipseOutline => "ellipse-outline",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        InputMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = InputMode::ALL.iter().map(|m| m.as_str()).collect();
                format!("unknown input mode '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_and_snake_case() {
        assert_eq!("rectangle-outline".parse(), Ok(InputMode::RectangleOutline));
        assert_eq!("Ellipse_Outline".parse(), Ok(InputMode::EllipseOutline));
        assert!("lasso".parse::<InputMode>().is_err());
        for mode in InputMode::ALL {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn only_shape_modes_produce_shapes() {
        assert!(InputMode::Pixel.shape((0, 0), (1, 1)).is_none());
        assert!(!InputMode::Pixel.is_shape());
        assert_eq!(
            InputMode::Line.shape((0, 0), (2, 2)),
            Some(Shape::Line {
                start: (0, 0),
                end: (2, 2)
            })
        );
    }
}
