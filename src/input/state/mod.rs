mod actions;
mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use core::{DragState, EditorListener, EditorOptions, EditorState, Interaction};
