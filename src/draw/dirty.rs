//! Dirty region tracking for the visible surface.
//!
//! Collects the pixel rectangles the compositor repainted so a host can push
//! only those regions to the screen.

use crate::util::Rect;

/// Tracks repainted rectangles accumulated between host presents.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    ///
    /// A rectangle already covered by a recorded one is dropped; repeated
    /// paints of the same cell during a drag would otherwise pile up.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        if self.regions.iter().any(|existing| covers(*existing, rect)) {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            Rect::new(0, 0, width, height).into_iter().collect()
        } else {
            self.regions.drain(..).collect()
        }
    }
}

fn covers(outer: Rect, inner: Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_rect_records_and_drains() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(0, 0, 10, 10).unwrap());
        tracker.mark_rect(Rect::new(20, 0, 5, 5).unwrap());
        tracker.mark_optional_rect(None);
        assert!(!tracker.is_clean());

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects.len(), 2);
        assert!(tracker.is_clean());
        assert!(tracker.take_regions(100, 100).is_empty());
    }

    #[test]
    fn contained_rectangles_are_not_duplicated() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(0, 0, 10, 10).unwrap());
        tracker.mark_rect(Rect::new(2, 2, 3, 3).unwrap());
        tracker.mark_rect(Rect::new(0, 0, 10, 10).unwrap());
        assert_eq!(tracker.take_regions(50, 50).len(), 1);
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(5, 5, 10, 10).unwrap());
        tracker.mark_full();
        tracker.mark_rect(Rect::new(20, 20, 15, 15).unwrap());

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0], Rect::new(0, 0, 200, 100).unwrap());
    }
}
