//! Debounced undo/redo history.
//!
//! Edits are not recorded one by one. Every committed mutation re-arms a
//! quiet-period alarm; when it fires, the current grid is diffed against the
//! snapshot taken at the previous commit and the difference becomes one
//! undoable [`ChangeSet`].

use crate::grid::{ChangeSet, Grid};
use std::time::{Duration, Instant};

/// Default quiet period before pending edits become an undo step.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Single re-armable alarm. Arming again replaces the pending deadline, so at
/// most one firing is ever outstanding.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// (Re)starts the quiet period at `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when the deadline has passed, disarming the alarm.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Undo and redo stacks plus the snapshot pending edits are diffed against.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<ChangeSet>,
    redo_stack: Vec<ChangeSet>,
    previous: Grid,
    debounce: Debounce,
}

impl History {
    pub fn new(initial: &Grid, delay: Duration) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            previous: initial.clone(),
            debounce: Debounce::new(delay),
        }
    }

    pub fn has_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether edits are waiting for the quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.debounce.is_armed()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Records that the grid changed at `now`.
    pub fn note_change(&mut self, now: Instant) {
        self.debounce.arm(now);
    }

    /// Returns true once when the quiet period has ended at `now`; the caller
    /// then commits.
    pub fn fire(&mut self, now: Instant) -> bool {
        self.debounce.fire(now)
    }

    /// Diffs `current` against the previous snapshot right away.
    ///
    /// A non-empty diff is pushed as one undo step and invalidates the redo
    /// stack. An empty diff is dropped. Either way the alarm is disarmed.
    pub fn commit(&mut self, current: &Grid) -> bool {
        self.debounce.cancel();
        let changes = self.previous.diff(current);
        if changes.is_empty() {
            log::debug!("History commit skipped: no cell changed");
            return false;
        }
        log::debug!("History commit: {} cell(s)", changes.len());
        self.undo_stack.push(changes);
        self.redo_stack.clear();
        self.previous = current.clone();
        true
    }

    /// Moves the newest undo step to the redo stack and returns it.
    ///
    /// The caller restores each edit's old color and then calls
    /// [`History::sync`] with the restored grid.
    pub fn undo(&mut self) -> Option<&ChangeSet> {
        let changes = self.undo_stack.pop()?;
        self.redo_stack.push(changes);
        self.redo_stack.last()
    }

    /// Moves the newest redo step back to the undo stack and returns it.
    pub fn redo(&mut self) -> Option<&ChangeSet> {
        let changes = self.redo_stack.pop()?;
        self.undo_stack.push(changes);
        self.undo_stack.last()
    }

    /// Makes `current` the snapshot future edits are diffed against.
    pub fn sync(&mut self, current: &Grid) {
        self.previous = current.clone();
    }

    /// Empties both stacks and forgets pending edits without touching the grid.
    pub fn clear(&mut self, current: &Grid) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.debounce.cancel();
        self.sync(current);
    }
}
