//! Linear undo/redo log of stroke collections.

use crate::canvas::StrokeCollection;

/// Default maximum number of snapshots to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Snapshot log with a cursor.
///
/// The log is never empty: it starts with one empty collection and the
/// cursor always points at a valid entry.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    snapshots: Vec<StrokeCollection>,
    index: usize,
    limit: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryLog {
    /// Create a log holding one empty snapshot. `limit` is at least 1.
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: vec![StrokeCollection::new()],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new state, discarding anything that was undone.
    pub fn record(&mut self, collection: StrokeCollection) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(collection);

        // Limit history size
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back. Returns the restored snapshot, or `None` at the oldest state.
    pub fn undo(&mut self) -> Option<&StrokeCollection> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward. Returns the restored snapshot, or `None` at the newest state.
    pub fn redo(&mut self) -> Option<&StrokeCollection> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &StrokeCollection {
        &self.snapshots[self.index]
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; the log holds at least the initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
