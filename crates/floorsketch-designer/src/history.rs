//! Undo/redo history.
//!
//! A bounded linear history of operation records. Recording a new operation
//! clears the redo stack; the oldest entries are dropped once `max_depth` is
//! exceeded. Each editing store owns its own manager, so operations recorded
//! by the room store are never visible to the wall store and vice versa.

use std::collections::VecDeque;

/// Something that can be listed in an undo/redo menu.
pub trait HistoryEntry {
    /// Short human-readable description, e.g. "Move Kitchen".
    fn description(&self) -> String;
}

/// Linear undo/redo stacks for one editing surface.
#[derive(Debug, Clone)]
pub struct UndoRedoManager<T> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    max_depth: usize,
    enabled: bool,
}

impl<T> Default for UndoRedoManager<T> {
    fn default() -> Self {
        Self::new(50)
    }
}

impl<T> UndoRedoManager<T> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            enabled: true,
        }
    }

    /// Records a freshly applied operation. Ignored while history is disabled.
    pub fn record(&mut self, entry: T) {
        if !self.enabled {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push_back(entry);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Moves the most recent operation to the redo stack and returns it so
    /// the caller can reverse it.
    pub fn undo(&mut self) -> Option<&T> {
        let entry = self.undo_stack.pop_back()?;
        self.redo_stack.push(entry);
        self.redo_stack.last()
    }

    /// Moves the most recently undone operation back to the undo stack and
    /// returns it so the caller can re-apply it.
    pub fn redo(&mut self) -> Option<&T> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push_back(entry);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Changes the depth limit, dropping the oldest entries if needed.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Iterates the undo stack from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.undo_stack.iter()
    }
}

impl<T: HistoryEntry> UndoRedoManager<T> {
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(HistoryEntry::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(HistoryEntry::description)
    }
}
