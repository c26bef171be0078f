//! In-memory, append-only log of membership events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::types::LogEntry;

/// Append-only log of joins and leaves.
///
/// It is trivially cloneable; clones share the same entries. Appends from
/// concurrent handler tasks are serialized by an internal mutex, so no entry
/// is ever lost.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end of the log.
    pub fn append(&self, entry: LogEntry) {
        self.lock().push(entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the current entries out, in insertion order.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave a half-pushed entry behind.
    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
