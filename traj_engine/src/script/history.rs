//! Script undo/redo history
//!
//! Whole-text snapshots with a cursor, bounded so a long editing session
//! cannot grow memory without limit. Stepping past either end is a no-op
//! rather than an error, undo/redo buttons get mashed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A bounded undo/redo history over script text.
#[derive(Debug, Clone)]
pub struct ScriptHistory {
    /// Snapshots ordered oldest to newest
    snapshots: VecDeque<String>,

    /// Index of the current snapshot within `snapshots`
    cursor: usize,

    /// Maximum number of snapshots kept
    capacity: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptHistory {
    /// Create a history seeded with the initial script text.
    ///
    /// A capacity of zero is treated as one, the history must always hold
    /// the current snapshot.
    pub fn new(initial: &str, capacity: usize) -> Self {
        let capacity = capacity.max(1);

        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial.to_string());

        ScriptHistory {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    /// Record a new snapshot, discarding any redo tail.
    ///
    /// Committing text identical to the current snapshot is a no-op, in
    /// particular it leaves the redo tail intact.
    pub fn commit(&mut self, text: &str) {
        if text == self.current() {
            return;
        }

        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(text.to_string());
        self.cursor += 1;

        // Evict the oldest snapshot once over capacity
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            self.cursor -= 1;
        }
    }

    /// Step back one snapshot, returning the new current text.
    ///
    /// Returns `None` without moving when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot, returning the new current text.
    ///
    /// Returns `None` without moving when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }

        self.cursor += 1;
        Some(self.current())
    }

    /// The text of the current snapshot.
    pub fn current(&self) -> &str {
        &self.snapshots[self.cursor]
    }

    /// True if a call to [`ScriptHistory::undo`] would move.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True if a call to [`ScriptHistory::redo`] would move.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots currently held.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seed_is_current() {
        let history = ScriptHistory::new("reto 10\n", 50);

        assert_eq!(history.current(), "reto 10\n");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_walk_the_snapshots() {
        let mut history = ScriptHistory::new("a", 50);
        history.commit("b");
        history.commit("c");

        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), "a");

        assert_eq!(history.redo(), Some("b"));
        assert_eq!(history.redo(), Some("c"));
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), "c");
    }

    #[test]
    fn commit_after_undo_drops_redo_tail() {
        let mut history = ScriptHistory::new("a", 50);
        history.commit("b");
        history.commit("c");

        history.undo();
        history.commit("d");

        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), "d");
        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
    }

    #[test]
    fn identical_commit_is_a_noop() {
        let mut history = ScriptHistory::new("a", 50);
        history.commit("b");
        history.commit("c");
        history.undo();

        // Re-committing the text we're already on must not eat the redo
        history.commit("b");

        assert_eq!(history.snapshot_count(), 3);
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some("c"));
    }

    #[test]
    fn capacity_evicts_oldest_snapshots() {
        let mut history = ScriptHistory::new("0", 3);
        for text in ["1", "2", "3", "4"].iter() {
            history.commit(text);
        }

        assert_eq!(history.snapshot_count(), 3);
        assert_eq!(history.current(), "4");

        assert_eq!(history.undo(), Some("3"));
        assert_eq!(history.undo(), Some("2"));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn zero_capacity_still_holds_current() {
        let mut history = ScriptHistory::new("a", 0);
        history.commit("b");

        assert_eq!(history.current(), "b");
        assert!(!history.can_undo());
        assert_eq!(history.snapshot_count(), 1);
    }
}
