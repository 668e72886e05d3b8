//! Static alignment guides and the memoized base layer.
//!
//! The base layer (grid separator lines plus any guides matching the canvas
//! dimensions) only depends on the canvas geometry, so it is rendered once per
//! `(width, height, cell_size, gutter)` and reused on every later rebuild.

use super::color::{BLUE, Color, GRID_LINE, GREEN, RED};
use super::layers::CellMetrics;
use super::render::{self, LineStyle};
use crate::error::EditorError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tiny_skia::Pixmap;

/// A named overlay polyline drawn beneath user content.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub name: String,
    /// Grid dimensions the guide was drawn for; `None` never matches.
    pub size: Option<(usize, usize)>,
    pub color: Color,
    pub opacity: f64,
    /// Polyline vertices in cell units, measured on grid-line coordinates.
    pub lines: Vec<(f32, f32)>,
    pub dash: Vec<f32>,
    pub dash_offset: f32,
}

impl Guide {
    pub fn applies_to(&self, width: usize, height: usize) -> bool {
        self.size == Some((width, height))
    }
}

fn guide(name: &str, size: (usize, usize), color: Color, opacity: f64, lines: &[(u8, u8)]) -> Guide {
    Guide {
        name: name.to_string(),
        size: Some(size),
        color,
        opacity,
        lines: lines.iter().map(|&(x, y)| (x as f32, y as f32)).collect(),
        dash: Vec::new(),
        dash_offset: 0.0,
    }
}

/// Icon-template guides for the 22x22 canvas.
pub fn builtin_guides() -> Vec<Guide> {
    vec![
        guide(
            "Circle Outer",
            (22, 22),
            RED,
            0.25,
            &[
                (7, 1), (15, 1), (15, 2), (17, 2), (17, 3), (18, 3), (18, 4), (19, 4),
                (19, 5), (20, 5), (20, 7), (21, 7), (21, 15), (20, 15), (20, 17), (19, 17),
                (19, 18), (18, 18), (18, 19), (17, 19), (17, 20), (15, 20), (15, 21), (7, 21),
                (7, 20), (5, 20), (5, 19), (4, 19), (4, 18), (3, 18), (3, 17), (2, 17),
                (2, 15), (1, 15), (1, 7), (2, 7), (2, 5), (3, 5), (3, 4), (4, 4),
                (4, 3), (5, 3), (5, 2), (7, 2), (7, 1),
            ],
        ),
        guide(
            "Circle Inner",
            (22, 22),
            BLUE,
            0.25,
            &[
                (8, 3), (14, 3), (14, 4), (16, 4), (16, 5), (17, 5), (17, 6), (18, 6),
                (18, 8), (19, 8), (19, 14), (18, 14), (18, 16), (17, 16), (17, 17), (16, 17),
                (16, 18), (14, 18), (14, 19), (8, 19), (8, 18), (6, 18), (6, 17), (5, 17),
                (5, 16), (4, 16), (4, 14), (3, 14), (3, 8), (4, 8), (4, 6), (5, 6),
                (5, 5), (6, 5), (6, 4), (8, 4), (8, 3),
            ],
        ),
        guide(
            "Square",
            (22, 22),
            GREEN,
            0.4,
            &[(2, 2), (20, 2), (20, 20), (2, 20), (2, 2)],
        ),
    ]
}

/// Centered horizontal and vertical guides, used when no catalog entry fits.
fn crosshair(width: usize, height: usize) -> Vec<Guide> {
    let (w, h) = (width as f32, height as f32);
    let line = |name: &str, lines: Vec<(f32, f32)>| Guide {
        name: name.to_string(),
        size: None,
        color: BLUE,
        opacity: 0.4,
        lines,
        dash: Vec::new(),
        dash_offset: 0.0,
    };
    vec![
        line("Horizontal", vec![(0.0, h / 2.0), (w, h / 2.0)]),
        line("Vertical", vec![(w / 2.0, 0.0), (w / 2.0, h)]),
    ]
}

/// Guides to draw for a `width` x `height` grid.
///
/// Catalog entries tagged with exactly these dimensions win. Otherwise the
/// centered crosshair is used, but only when both dimensions are even.
pub fn select_guides(catalog: &[Guide], width: usize, height: usize) -> Vec<Guide> {
    let matching: Vec<Guide> = catalog
        .iter()
        .filter(|guide| guide.applies_to(width, height))
        .cloned()
        .collect();
    if !matching.is_empty() {
        return matching;
    }
    if width % 2 == 0 && height % 2 == 0 {
        crosshair(width, height)
    } else {
        Vec::new()
    }
}

/// Memo key for a rendered base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseKey {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
    pub gutter: u32,
}

impl BaseKey {
    pub fn new(width: usize, height: usize, metrics: CellMetrics) -> Self {
        Self {
            width,
            height,
            cell_size: metrics.cell_size,
            gutter: metrics.gutter,
        }
    }

    fn metrics(&self) -> CellMetrics {
        CellMetrics::new(self.cell_size, self.gutter)
    }
}

/// Owned cache of rendered base layers.
///
/// Each editor session owns one; [`GuideCache::clear`] drops every entry,
/// e.g. after the guide catalog changes.
#[derive(Debug)]
pub struct GuideCache {
    catalog: Vec<Guide>,
    entries: HashMap<BaseKey, Pixmap>,
}

impl Default for GuideCache {
    fn default() -> Self {
        Self::new(builtin_guides())
    }
}

impl GuideCache {
    pub fn new(catalog: Vec<Guide>) -> Self {
        Self {
            catalog,
            entries: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &[Guide] {
        &self.catalog
    }

    /// Appends guides to the catalog. Cached layers are dropped.
    pub fn extend_catalog(&mut self, guides: impl IntoIterator<Item = Guide>) {
        self.catalog.extend(guides);
        self.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &BaseKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the base layer for `key`, rendering it on first use.
    pub fn base_layer(&mut self, key: BaseKey) -> Result<&Pixmap, EditorError> {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                log::debug!("Guide cache hit for {}x{}", key.width, key.height);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                log::debug!(
                    "Guide cache miss for {}x{} at {}px (gutter {})",
                    key.width,
                    key.height,
                    key.cell_size,
                    key.gutter
                );
                let pixmap = render_base(&self.catalog, key)?;
                Ok(entry.insert(pixmap))
            }
        }
    }
}

/// Renders grid separator lines followed by the selected guides.
fn render_base(catalog: &[Guide], key: BaseKey) -> Result<Pixmap, EditorError> {
    let metrics = key.metrics();
    let (surface_width, surface_height) = metrics.canvas_size(key.width, key.height);
    let mut pixmap =
        Pixmap::new(surface_width, surface_height).ok_or(EditorError::Surface {
            width: surface_width,
            height: surface_height,
        })?;

    render::render_grid_lines(
        &mut pixmap,
        key.width,
        key.height,
        metrics.pitch() as i32,
        metrics.gutter as i32,
        GRID_LINE,
    );

    let pitch = metrics.pitch() as f32;
    let offset = metrics.gutter.max(1) as f32 / 2.0;
    for guide in select_guides(catalog, key.width, key.height) {
        let points: Vec<(f32, f32)> = guide
            .lines
            .iter()
            .map(|&(x, y)| (x * pitch + offset, y * pitch + offset))
            .collect();
        let style = LineStyle {
            color: guide.color.with_opacity(guide.opacity),
            width: 1.0,
            dash: &guide.dash,
            dash_offset: guide.dash_offset,
        };
        render::render_polyline(&mut pixmap, &points, &style);
    }

    Ok(pixmap)
}
