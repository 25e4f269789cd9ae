//! The command-line editor ring (spec.md §4.5): the last 8 lines entered
//! at the command line, cursor-navigated with the arrow keys the way a
//! shell history buffer is.

use alloc::{
    collections::VecDeque,
    string::String,
};

/// How many prior command lines the ring retains.
pub const EDITOR_RING_CAPACITY: usize = 8;

/// The 8 most recent command lines, with a cursor for stepping through
/// them without disturbing the ring itself.
#[derive(Debug, Clone)]
pub struct EditorRing {
    lines: VecDeque<String>,
    cursor: Option<usize>,
}

impl EditorRing {
    /// An empty ring.
    pub fn new() -> Self {
        EditorRing {
            lines: VecDeque::with_capacity(EDITOR_RING_CAPACITY),
            cursor: None,
        }
    }

    /// Record a freshly entered command line, evicting the oldest entry
    /// once the ring is full, and reset the navigation cursor.
    pub fn push(&mut self, line: String) {
        if self.lines.len() == EDITOR_RING_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        self.cursor = None;
    }

    /// The lines currently retained, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Step the cursor to the previous (older) line, returning it.
    pub fn previous(&mut self) -> Option<&str> {
        if self.lines.is_empty() {
            return None;
        }
        let next_index = match self.cursor {
            None => self.lines.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(next_index);
        self.lines.get(next_index).map(String::as_str)
    }

    /// Step the cursor to the next (newer) line, returning it, or `None`
    /// once past the newest entry.
    pub fn next(&mut self) -> Option<&str> {
        let index = self.cursor?;
        if index + 1 >= self.lines.len() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(index + 1);
        self.lines.get(index + 1).map(String::as_str)
    }
}

impl Default for EditorRing {
    fn default() -> Self {
        EditorRing::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_capacity_evicts_the_oldest_line() {
        let mut ring = EditorRing::new();
        for i in 0..EDITOR_RING_CAPACITY + 1 {
            ring.push(alloc::format!("line {i}"));
        }
        assert_eq!(ring.lines().count(), EDITOR_RING_CAPACITY);
        assert_eq!(ring.lines().next(), Some("line 1"));
    }

    #[test]
    fn previous_then_next_returns_to_the_starting_point() {
        let mut ring = EditorRing::new();
        ring.push("first".into());
        ring.push("second".into());
        assert_eq!(ring.previous(), Some("second"));
        assert_eq!(ring.previous(), Some("first"));
        assert_eq!(ring.next(), Some("second"));
        assert_eq!(ring.next(), None);
    }
}
