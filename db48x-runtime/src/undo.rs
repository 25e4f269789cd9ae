//! The undo snapshot ring (spec.md §4.5): a bounded history of data-stack
//! states, one pushed before each command that mutates the stack, so
//! `Undo` can restore the previous state and `Redo` can step back forward.

use alloc::vec::Vec;

/// A bounded LIFO history of stack snapshots, plus a forward history for
/// `Redo` once something has been undone.
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    history: Vec<Vec<T>>,
    redo: Vec<Vec<T>>,
    capacity: usize,
}

impl<T> UndoStack<T> {
    /// An undo ring retaining at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        UndoStack {
            history: Vec::new(),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Record `snapshot` as the state just before a mutating command,
    /// evicting the oldest entry if the ring is full, and clearing any
    /// pending redo history (a fresh command invalidates it).
    pub fn record(&mut self, snapshot: Vec<T>) {
        if self.history.len() == self.capacity {
            self.history.remove(0);
        }
        self.history.push(snapshot);
        self.redo.clear();
    }

    /// `Undo`: pop the most recent snapshot, pushing `current` onto the
    /// redo history so `Redo` can restore it.
    pub fn undo(&mut self, current: Vec<T>) -> Option<Vec<T>> {
        let previous = self.history.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// `Redo`: restore the most recently undone state.
    pub fn redo(&mut self, current: Vec<T>) -> Option<Vec<T>> {
        let next = self.redo.pop()?;
        self.history.push(current);
        Some(next)
    }

    /// `true` when there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_restores_the_previous_snapshot() {
        let mut undo: UndoStack<i64> = UndoStack::new(4);
        undo.record(alloc::vec![1, 2]);
        let restored = undo.undo(alloc::vec![1, 2, 3]).unwrap();
        assert_eq!(restored, alloc::vec![1, 2]);
    }

    #[test]
    fn redo_restores_what_was_just_undone() {
        let mut undo: UndoStack<i64> = UndoStack::new(4);
        undo.record(alloc::vec![1, 2]);
        let after_undo = undo.undo(alloc::vec![1, 2, 3]).unwrap();
        let after_redo = undo.redo(after_undo).unwrap();
        assert_eq!(after_redo, alloc::vec![1, 2, 3]);
    }

    #[test]
    fn ring_evicts_the_oldest_entry_past_capacity() {
        let mut undo: UndoStack<i64> = UndoStack::new(1);
        undo.record(alloc::vec![1]);
        undo.record(alloc::vec![2]);
        assert_eq!(undo.undo(alloc::vec![3]), Some(alloc::vec![2]));
        assert!(undo.is_empty());
    }

    #[test]
    fn recording_a_new_snapshot_clears_pending_redo() {
        let mut undo: UndoStack<i64> = UndoStack::new(4);
        undo.record(alloc::vec![1]);
        let after_undo = undo.undo(alloc::vec![2]).unwrap();
        undo.record(after_undo);
        assert_eq!(undo.redo(alloc::vec![1]), None);
    }
}
