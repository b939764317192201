/// Bounded undo/redo over immutable snapshots.
///
/// Both `EloState` and scored result lists are plain values that are replaced
/// rather than mutated, so history is just a stack of previous values.
use std::collections::VecDeque;

use crate::constants::UNDO_HISTORY_LIMIT;

#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    present: T,
    past: VecDeque<T>,
    future: Vec<T>,
    limit: usize,
}

impl<T> UndoStack<T> {
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, UNDO_HISTORY_LIMIT)
    }

    pub fn with_limit(initial: T, limit: usize) -> Self {
        UndoStack { present: initial, past: VecDeque::new(), future: Vec::new(), limit }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Replace the present value, recording the old one and clearing redo.
    pub fn push(&mut self, next: T) {
        let prev = std::mem::replace(&mut self.present, next);
        self.past.push_back(prev);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Step back. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, prev);
        self.future.push(current);
        true
    }

    /// Step forward. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn into_present(self) -> T {
        self.present
    }
}
