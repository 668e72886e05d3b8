//! tiny-skia painting primitives used by the layer compositor.
//!
//! All coordinates are surface pixels. Helpers never fail: drawing requests
//! that fall completely outside the surface or describe an empty area are
//! silently skipped, matching how a canvas clips out-of-range drawing.

use super::color::Color;
use crate::util::Rect;
use tiny_skia::{
    BlendMode, FillRule, IntRect, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash,
    Transform,
};

/// Stroke parameters for guide polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle<'a> {
    pub color: Color,
    pub width: f32,
    /// Alternating on/off lengths; empty draws a solid line.
    pub dash: &'a [f32],
    pub dash_offset: f32,
}

fn solid_paint(color: Color, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = anti_alias;
    paint
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

fn surface_bounds(pixmap: &Pixmap) -> (i32, i32) {
    (pixmap.width() as i32, pixmap.height() as i32)
}

/// Replaces the pixels of `rect` with `color`.
///
/// Uses source blending, so a transparent color clears the region instead of
/// leaving the previous content visible.
pub fn fill_rect(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let (width, height) = surface_bounds(pixmap);
    let Some(area) = rect.clamp_to_bounds(width, height).and_then(to_skia_rect) else {
        return;
    };
    let mut paint = solid_paint(color, false);
    paint.blend_mode = BlendMode::Source;
    pixmap.fill_rect(area, &paint, Transform::identity(), None);
}

/// Clears `rect` to fully transparent pixels.
pub fn clear_rect(pixmap: &mut Pixmap, rect: Rect) {
    let (width, height) = surface_bounds(pixmap);
    let Some(area) = rect.clamp_to_bounds(width, height).and_then(to_skia_rect) else {
        return;
    };
    let mut paint = Paint::default();
    paint.blend_mode = BlendMode::Clear;
    pixmap.fill_rect(area, &paint, Transform::identity(), None);
}

/// Fills `rect` with an alternating two-color pattern of `square`-pixel tiles.
///
/// Tiles are anchored at the rectangle's own origin so each cell shows the
/// same pattern regardless of where it sits on the canvas.
pub fn fill_checkerboard(pixmap: &mut Pixmap, rect: Rect, square: i32, light: Color, dark: Color) {
    let square = square.max(1);
    let mut row = 0;
    let mut y = rect.y;
    while y < rect.bottom() {
        let tile_height = square.min(rect.bottom() - y);
        let mut col = 0;
        let mut x = rect.x;
        while x < rect.right() {
            let tile_width = square.min(rect.right() - x);
            let color = if (row + col) % 2 == 0 { light } else { dark };
            if let Some(tile) = Rect::new(x, y, tile_width, tile_height) {
                fill_rect(pixmap, tile, color);
            }
            x += square;
            col += 1;
        }
        y += square;
        row += 1;
    }
}

/// Draws the two-tone preview marker: a light disc with an accent dot on top.
pub fn render_marker(
    pixmap: &mut Pixmap,
    center_x: f32,
    center_y: f32,
    radius: f32,
    ring: Color,
    dot: Color,
) {
    if radius <= 0.0 {
        return;
    }
    let outer = PathBuilder::from_circle(center_x, center_y, radius);
    let inner = PathBuilder::from_circle(center_x, center_y, radius * 0.5);
    if let Some(path) = outer {
        let paint = solid_paint(ring, true);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    if let Some(path) = inner {
        let paint = solid_paint(dot, true);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Strokes an open polyline through `points`.
pub fn render_polyline(pixmap: &mut Pixmap, points: &[(f32, f32)], style: &LineStyle<'_>) {
    let Some((&(first_x, first_y), rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() || style.width <= 0.0 {
        return;
    }

    let mut builder = PathBuilder::new();
    builder.move_to(first_x, first_y);
    for &(x, y) in rest {
        builder.line_to(x, y);
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let mut stroke = Stroke {
        width: style.width,
        ..Stroke::default()
    };
    if !style.dash.is_empty() {
        // StrokeDash rejects odd-length or all-zero arrays; fall back to solid.
        stroke.dash = StrokeDash::new(style.dash.to_vec(), style.dash_offset);
    }
    let paint = solid_paint(style.color, true);
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Draws the separator lines between cells.
///
/// Line `k` occupies `gutter` pixels starting at `k * pitch`, for `k` in
/// `0..=columns` (and likewise for rows), so the outer border is included.
pub fn render_grid_lines(
    pixmap: &mut Pixmap,
    columns: usize,
    rows: usize,
    pitch: i32,
    gutter: i32,
    color: Color,
) {
    if gutter <= 0 {
        return;
    }
    let (width, height) = surface_bounds(pixmap);
    for col in 0..=columns as i32 {
        if let Some(line) = Rect::new(col * pitch, 0, gutter, height) {
            fill_rect(pixmap, line, color);
        }
    }
    for row in 0..=rows as i32 {
        if let Some(line) = Rect::new(0, row * pitch, width, gutter) {
            fill_rect(pixmap, line, color);
        }
    }
}

/// Blends the `rect` region of `src` over the same region of `dst`.
pub fn composite_region(dst: &mut Pixmap, src: &Pixmap, rect: Rect) {
    let (width, height) = surface_bounds(src);
    let Some(rect) = rect.clamp_to_bounds(width, height) else {
        return;
    };
    let Some(area) = IntRect::from_xywh(rect.x, rect.y, rect.width as u32, rect.height as u32)
    else {
        return;
    };
    let Some(patch) = src.clone_rect(area) else {
        return;
    };
    dst.draw_pixmap(
        rect.x,
        rect.y,
        patch.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}
