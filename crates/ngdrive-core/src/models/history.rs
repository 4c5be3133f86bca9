use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the recently-viewed log.
///
/// `file_name` references a stored object by name only. Deleting the object
/// does not invalidate the entry; the history is a once-viewed log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub file_name: String,
    pub viewed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(file_name: impl Into<String>, viewed_at: DateTime<Utc>) -> Self {
        HistoryEntry {
            file_name: file_name.into(),
            viewed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_round_trips_through_json() {
        let entry = HistoryEntry::new("report.pdf", Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
