use crate::types::HistoryEntry;
use std::collections::VecDeque;
use tracing::debug;

/// Maximum number of attempts retained; oldest entries are evicted first.
pub const MAX_ENTRIES: usize = 100;

/// Append-only, size-bounded log of generation attempts, newest first.
///
/// Single writer; entries are immutable once recorded and are only ever
/// removed by truncation from the tail.
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_ENTRIES),
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        debug!(
            "Recording history entry {} for pair ({}, {}), success: {}",
            entry.id,
            entry.left_emoji,
            entry.right_emoji,
            entry.result.is_some()
        );
        self.entries.push_front(entry);
        self.entries.truncate(MAX_ENTRIES);
    }

    /// All retained entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
