//! Accumulates the organization log and writes it once at the end.

use super::types::LogEntry;
use crate::error::JournalError;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Append-only list of source→copy mappings
///
/// Holds exactly one entry per successful copy, in the order copies
/// finished.
#[derive(Debug, Default)]
pub struct OrganizeJournal {
    entries: Mutex<Vec<LogEntry>>,
}

impl OrganizeJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the entries so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Log text: one line per entry, newline-separated, no trailing newline
    pub fn render(&self) -> String {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(LogEntry::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the log to `path`, replacing any previous log
    pub fn flush(&self, path: &Path) -> Result<(), JournalError> {
        let write_error = |source| JournalError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, self.render()).map_err(write_error)
    }
}
