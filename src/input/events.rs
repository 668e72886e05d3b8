//! Pointer event types delivered by the host.

use crate::draw::CellMetrics;

/// Button mask bit of the primary (paint) button.
pub const PRIMARY_BUTTON: u32 = 1;
/// Button mask bit of the secondary button. Not accepted for drags.
pub const SECONDARY_BUTTON: u32 = 2;
/// Button mask reported by a pen's eraser end.
pub const ERASER_BUTTON: u32 = 32;

/// What a drag does to the cells it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    /// Write the active color
    Paint,
    /// Write background (index 0)
    Erase,
}

impl StrokeKind {
    /// Maps a pressed-buttons mask to a stroke. Masks other than exactly
    /// primary or eraser are rejected.
    pub fn from_buttons(buttons: u32) -> Option<Self> {
        match buttons {
            PRIMARY_BUTTON => Some(StrokeKind::Paint),
            ERASER_BUTTON => Some(StrokeKind::Erase),
            _ => None,
        }
    }
}

/// A pointer sample in visible-surface pixel coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Pressed-buttons bitmask
    pub buttons: u32,
    /// Intermediate samples the device reported since the previous event,
    /// oldest first. Empty when the host does not coalesce input.
    pub coalesced: Vec<(f64, f64)>,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, buttons: u32) -> Self {
        Self {
            x,
            y,
            buttons,
            coalesced: Vec::new(),
        }
    }

    /// Event positioned at the center of cell `(x, y)`.
    pub fn at_cell(metrics: CellMetrics, x: usize, y: usize, buttons: u32) -> Self {
        let (cx, cy) = metrics.cell_center(x, y);
        Self::new(cx as f64, cy as f64, buttons)
    }

    pub fn with_coalesced(mut self, points: Vec<(f64, f64)>) -> Self {
        self.coalesced = points;
        self
    }

    /// Samples to process for this event: the coalesced list when present,
    /// otherwise the event position alone.
    pub fn samples(&self) -> Vec<(f64, f64)> {
        if self.coalesced.is_empty() {
            vec![(self.x, self.y)]
        } else {
            self.coalesced.clone()
        }
    }
}

/// Result of handing a pointer event to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event changed editor state
    Handled,
    /// Nothing to do (no drag in progress, same cell as before)
    Ignored,
    /// Unsupported button mask; the host should prevent the default action
    Suppressed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primary_and_eraser_masks_start_strokes() {
        assert_eq!(StrokeKind::from_buttons(PRIMARY_BUTTON), Some(StrokeKind::Paint));
        assert_eq!(StrokeKind::from_buttons(ERASER_BUTTON), Some(StrokeKind::Erase));
        assert_eq!(StrokeKind::from_buttons(SECONDARY_BUTTON), None);
        assert_eq!(StrokeKind::from_buttons(PRIMARY_BUTTON | SECONDARY_BUTTON), None);
        assert_eq!(StrokeKind::from_buttons(0), None);
    }

    #[test]
    fn samples_fall_back_to_event_position() {
        let event = PointerEvent::new(3.0, 4.0, PRIMARY_BUTTON);
        assert_eq!(event.samples(), vec![(3.0, 4.0)]);
        let event = event.with_coalesced(vec![(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(event.samples(), vec![(1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn at_cell_targets_the_cell_center() {
        let metrics = CellMetrics::new(10, 1);
        let event = PointerEvent::at_cell(metrics, 2, 0, PRIMARY_BUTTON);
        assert_eq!(metrics.cell_at(event.x), 2);
        assert_eq!(metrics.cell_at(event.y), 0);
    }
}
