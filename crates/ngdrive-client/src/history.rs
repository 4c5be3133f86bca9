//! Recently-viewed tracker
//!
//! Bounded, deduplicated, most-recent-first log of previewed object names,
//! persisted through the `KvStore` seam on every change. Entries reference
//! objects by name only and survive the object's deletion.

use crate::kv::{KvError, KvStore};
use chrono::Utc;
use ngdrive_core::constants::{HISTORY_CAPACITY, HISTORY_KEY};
use ngdrive_core::HistoryEntry;
use std::sync::{Arc, Mutex};

pub struct RecencyTracker {
    kv: Arc<dyn KvStore>,
    key: String,
    capacity: usize,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl RecencyTracker {
    pub fn load(kv: Arc<dyn KvStore>) -> Self {
        Self::load_with(kv, HISTORY_KEY.to_string(), HISTORY_CAPACITY)
    }

    /// Read the persisted sequence once at startup. Missing or unparsable
    /// data is treated as no history; never a fatal error.
    pub fn load_with(kv: Arc<dyn KvStore>, key: String, capacity: usize) -> Self {
        let mut entries = match kv.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::debug!(error = %e, "Stored view history unparsable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::debug!(error = %e, "View history unreadable, starting empty");
                Vec::new()
            }
        };
        entries.truncate(capacity);

        RecencyTracker {
            kv,
            key,
            capacity,
            entries: Mutex::new(entries),
        }
    }

    /// Record a preview of `file_name`: any existing entry for the name is
    /// replaced, the new entry goes to the front, the log is truncated to
    /// capacity, and the result is persisted. The whole cycle is one
    /// critical section so concurrent records cannot lose updates.
    pub fn record(&self, file_name: &str) -> Result<(), KvError> {
        let mut entries = self.entries.lock().unwrap();

        entries.retain(|e| e.file_name != file_name);
        entries.insert(0, HistoryEntry::new(file_name, Utc::now()));
        entries.truncate(self.capacity);

        let raw = serde_json::to_string(&*entries)?;
        self.kv.set(&self.key, &raw)
    }

    /// Entries, most recently viewed first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().unwrap().clone()
    }
}
