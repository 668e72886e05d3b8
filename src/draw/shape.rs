//! Shape rasterizers for the grid drawing tools.
//!
//! Every rasterizer takes two anchor cells (drag start and current/end point,
//! in any order) and returns the covered cells. Output is deterministic for a
//! given ordered pair of anchors and never contains the same cell twice.

use crate::util::Rect;
use std::collections::HashSet;

/// A grid cell coordinate.
pub type Cell = (i32, i32);

/// A rasterizable tool shape spanned by two anchor cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Straight line between the anchors, both ends inclusive
    Line { start: Cell, end: Cell },
    /// Filled axis-aligned rectangle
    Rect { start: Cell, end: Cell },
    /// Perimeter of the axis-aligned rectangle
    RectOutline { start: Cell, end: Cell },
    /// Filled ellipse inscribed in the anchors' bounding box
    Ellipse { start: Cell, end: Cell },
    /// One-cell ring of the inscribed ellipse
    EllipseOutline { start: Cell, end: Cell },
}

impl Shape {
    /// Cells covered by the shape.
    pub fn cells(&self) -> Vec<Cell> {
        match *self {
            Shape::Line { start, end } => line_cells(start, end),
            Shape::Rect { start, end } => rect_cells(start, end),
            Shape::RectOutline { start, end } => rect_outline_cells(start, end),
            Shape::Ellipse { start, end } => ellipse_cells(start, end),
            Shape::EllipseOutline { start, end } => ellipse_outline_cells(start, end),
        }
    }

    /// Cell-space bounding box of the two anchors.
    pub fn bounding_box(&self) -> Option<Rect> {
        let (start, end) = match *self {
            Shape::Line { start, end }
            | Shape::Rect { start, end }
            | Shape::RectOutline { start, end }
            | Shape::Ellipse { start, end }
            | Shape::EllipseOutline { start, end } => (start, end),
        };
        Rect::covering([start, end])
    }
}

/// Appends cells while skipping any already emitted.
struct CellSink {
    cells: Vec<Cell>,
    seen: HashSet<Cell>,
}

impl CellSink {
    fn new() -> Self {
        Self {
            cells: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn push(&mut self, x: i64, y: i64) {
        let cell = (x as i32, y as i32);
        if self.seen.insert(cell) {
            self.cells.push(cell);
        }
    }

    fn finish(self) -> Vec<Cell> {
        self.cells
    }
}

fn ordered_bounds(start: Cell, end: Cell) -> (i32, i32, i32, i32) {
    (
        start.0.min(end.0),
        start.1.min(end.1),
        start.0.max(end.0),
        start.1.max(end.1),
    )
}

// ============================================================================
// Line
// ============================================================================

/// Bresenham line, inclusive of both endpoints.
///
/// The walk always runs from the lexicographically smaller anchor so that
/// `line(a, b)` and `line(b, a)` cover the same cells; the result is reversed
/// when the caller's anchors were in the other order.
pub fn line_cells(start: Cell, end: Cell) -> Vec<Cell> {
    let swapped = end < start;
    let (from, to) = if swapped { (end, start) } else { (start, end) };

    let (mut x, mut y) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        cells.push((x as i32, y as i32));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    if swapped {
        cells.reverse();
    }
    cells
}

// ============================================================================
// Rectangles
// ============================================================================

/// Every cell inside the anchors' bounding box, row-major.
pub fn rect_cells(start: Cell, end: Cell) -> Vec<Cell> {
    let (min_x, min_y, max_x, max_y) = ordered_bounds(start, end);
    let mut cells = Vec::with_capacity(((max_x - min_x + 1) * (max_y - min_y + 1)) as usize);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            cells.push((x, y));
        }
    }
    cells
}

/// Border cells of the anchors' bounding box.
///
/// Uses the same inclusive bounds as [`rect_cells`], so the outline is always
/// a subset of the filled rectangle.
pub fn rect_outline_cells(start: Cell, end: Cell) -> Vec<Cell> {
    let (min_x, min_y, max_x, max_y) = ordered_bounds(start, end);
    if max_x - min_x < 2 || max_y - min_y < 2 {
        // No interior: the outline is the whole box.
        return rect_cells(start, end);
    }

    let mut cells = Vec::new();
    for x in min_x..=max_x {
        cells.push((x, min_y));
    }
    for y in min_y + 1..max_y {
        cells.push((min_x, y));
        cells.push((max_x, y));
    }
    for x in min_x..=max_x {
        cells.push((x, max_y));
    }
    cells
}

// ============================================================================
// Ellipses
// ============================================================================

/// Whether the anchors span a square box larger than one cell.
fn is_circle(start: Cell, end: Cell) -> bool {
    let w = (end.0 - start.0).abs();
    let h = (end.1 - start.1).abs();
    w == h && w != 0
}

/// Distance test for a cell of a `side` x `side` box, measured from the box
/// center to the cell center.
fn in_disc(x: i64, y: i64, side: i64) -> bool {
    let half = side as f64 / 2.0;
    let cx = x as f64 + 0.5 - half;
    let cy = y as f64 + 0.5 - half;
    (cx * cx + cy * cy).sqrt() <= half
}

/// Disc cell that has at least one 4-neighbour outside the disc.
fn on_ring(x: i64, y: i64, side: i64) -> bool {
    in_disc(x, y, side)
        && !(in_disc(x + 1, y, side)
            && in_disc(x - 1, y, side)
            && in_disc(x, y + 1, side)
            && in_disc(x, y - 1, side))
}

fn circle_cells(start: Cell, end: Cell, keep: fn(i64, i64, i64) -> bool) -> Vec<Cell> {
    let (min_x, min_y, max_x, _) = ordered_bounds(start, end);
    let side = (max_x - min_x + 1) as i64;
    let mut sink = CellSink::new();
    for y in 0..side {
        for x in 0..side {
            if keep(x, y, side) {
                sink.push(min_x as i64 + x, min_y as i64 + y);
            }
        }
    }
    sink.finish()
}

/// Midpoint ellipse boundary inscribed in the anchors' bounding box.
///
/// Points are produced four at a time (one per quadrant), followed by the
/// tip-completion pass that finishes very flat ellipses whose vertical run
/// ends before the outermost rows are reached.
fn ellipse_boundary(start: Cell, end: Cell) -> Vec<Cell> {
    let (mut x0, mut y0) = (start.0 as i64, start.1 as i64);
    let (mut x1, mut y1) = (end.0 as i64, end.1 as i64);

    let mut a = (x1 - x0).abs();
    let b = (y1 - y0).abs();
    let mut b1 = b & 1;
    let mut dx = 4 * (1 - a) * b * b;
    let mut dy = 4 * (b1 + 1) * a * a;
    let mut err = dx + dy + b1 * a * a;

    if x0 > x1 {
        x0 = x1;
        x1 += a;
    }
    if y0 > y1 {
        y0 = y1;
    }
    y0 += (b + 1) / 2;
    y1 = y0 - b1;
    a *= 8 * a;
    b1 = 8 * b * b;

    let mut sink = CellSink::new();
    loop {
        sink.push(x1, y0);
        sink.push(x0, y0);
        sink.push(x0, y1);
        sink.push(x1, y1);
        let e2 = 2 * err;
        if e2 <= dy {
            y0 += 1;
            y1 -= 1;
            dy += a;
            err += dy;
        }
        if e2 >= dx || 2 * err > dy {
            x0 += 1;
            x1 -= 1;
            dx += b1;
            err += dx;
        }
        if x0 > x1 {
            break;
        }
    }

    while y0 - y1 <= b {
        sink.push(x0 - 1, y0);
        sink.push(x1 + 1, y0);
        y0 += 1;
        sink.push(x0 - 1, y1);
        sink.push(x1 + 1, y1);
        y1 -= 1;
    }

    sink.finish()
}

/// Filled ellipse.
///
/// Non-square boxes fill each row between the extreme boundary points of the
/// midpoint ellipse. Square boxes fill the distance-test disc instead of the
/// midpoint walk: the circle ring is defined as the disc cells with a
/// 4-neighbour outside it, and the fill must be exactly that disc for the ring
/// to stay inside it.
pub fn ellipse_cells(start: Cell, end: Cell) -> Vec<Cell> {
    if is_circle(start, end) {
        return circle_cells(start, end, in_disc);
    }

    let boundary = ellipse_boundary(start, end);
    let mut spans: std::collections::BTreeMap<i32, (i32, i32)> = Default::default();
    for (x, y) in boundary {
        spans
            .entry(y)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(x);
                *hi = (*hi).max(x);
            })
            .or_insert((x, x));
    }

    let mut cells = Vec::new();
    for (y, (lo, hi)) in spans {
        for x in lo..=hi {
            cells.push((x, y));
        }
    }
    cells
}

/// One-cell ellipse ring.
///
/// Square boxes (perfect circles) use a distance threshold, keeping disc cells
/// with at least one 4-neighbour outside; this gives a thinner, more symmetric
/// ring than the midpoint walk at small radii. Other boxes use the midpoint
/// ellipse boundary.
pub fn ellipse_outline_cells(start: Cell, end: Cell) -> Vec<Cell> {
    if is_circle(start, end) {
        circle_cells(start, end, on_ring)
    } else {
        ellipse_boundary(start, end)
    }
}
