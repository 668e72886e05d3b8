//! Pointer input and the editor state machine.
//!
//! This module turns host pointer events into grid edits and previews. It
//! owns the active input mode, the drag state machine, and the command
//! surface (transforms, undo/redo, templates) of an editing session.

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Dispatch, ERASER_BUTTON, PRIMARY_BUTTON, PointerEvent, SECONDARY_BUTTON, StrokeKind};
pub use state::{DragState, EditorListener, EditorOptions, EditorState, Interaction};
pub use tool::InputMode;
