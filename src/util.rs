//! Integer rectangle helper shared by the grid, compositor and input layers.

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
///
/// The same type describes pixel regions of the layer surfaces and cell
/// regions of the grid; callers convert between the two through the
/// compositor's cell metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Smallest rectangle covering every `(x, y)` point, each treated as a 1x1 cell.
    pub fn covering<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for (x, y) in points {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        let (min_x, min_y, max_x, max_y) = bounds?;
        Self::from_min_max(min_x, min_y, max_x + 1, max_y + 1)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Union where either side may be missing.
    pub fn union_optional(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(self, amount: i32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2,
            height: self.height + amount * 2,
        }
    }

    /// Clamps the rectangle to `[0, width) x [0, height)`.
    ///
    /// Returns `None` when nothing of the rectangle remains inside the bounds.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let min_x = self.x.clamp(0, width.max(0));
        let min_y = self.y.clamp(0, height.max(0));
        let max_x = self.right().clamp(0, width.max(0));
        let max_y = self.bottom().clamp(0, height.max(0));
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_spans_all_points_inclusively() {
        let rect = Rect::covering([(3, 1), (0, 4), (2, 2)]).unwrap();
        assert_eq!(rect, Rect::new(0, 1, 4, 4).unwrap());
        assert!(Rect::covering(std::iter::empty::<(i32, i32)>()).is_none());
    }

    #[test]
    fn union_and_inflate_grow_bounds() {
        let a = Rect::new(0, 0, 2, 2).unwrap();
        let b = Rect::new(5, 5, 1, 1).unwrap();
        assert_eq!(a.union(b), Rect::new(0, 0, 6, 6).unwrap());
        assert_eq!(b.inflate(1), Rect::new(4, 4, 3, 3).unwrap());
        assert_eq!(Rect::union_optional(None, Some(b)), Some(b));
    }

    #[test]
    fn clamp_to_bounds_discards_outside_regions() {
        let rect = Rect::new(-2, -2, 5, 5).unwrap();
        assert_eq!(rect.clamp_to_bounds(10, 10), Rect::new(0, 0, 3, 3));
        let outside = Rect::new(20, 20, 2, 2).unwrap();
        assert!(outside.clamp_to_bounds(10, 10).is_none());
    }
}
