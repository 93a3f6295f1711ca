use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::refine::RefinementGoal;

/// Maximum number of entries kept in history.
pub const HISTORY_CAPACITY: usize = 10;

/// One past refinement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub original: String,
    pub refined: String,
    pub goal: RefinementGoal,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        original: impl Into<String>,
        refined: impl Into<String>,
        goal: RefinementGoal,
    ) -> Self {
        let timestamp = Utc::now().timestamp_millis();
        Self {
            id: generate_entry_id(timestamp),
            original: original.into(),
            refined: refined.into(),
            goal,
            timestamp,
        }
    }
}

/// Entry id: creation time in ms plus 8 random hex chars, so entries created
/// within the same millisecond still get distinct ids.
pub fn generate_entry_id(timestamp_ms: i64) -> String {
    let suffix: u32 = rand::random();
    format!("{}-{:08x}", timestamp_ms, suffix)
}

/// Most-recent-first list of at most [`HISTORY_CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from entries already ordered most-recent-first, keeping
    /// only the first [`HISTORY_CAPACITY`].
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Prepend `entry`, dropping the oldest entries beyond capacity.
    pub fn record(&self, entry: HistoryEntry) -> HistoryList {
        let mut entries = Vec::with_capacity(HISTORY_CAPACITY + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            id: format!("id-{}", n),
            original: format!("prompt {}", n),
            refined: format!("refined {}", n),
            goal: RefinementGoal::General,
            timestamp: 1_700_000_000_000 + n as i64,
        }
    }

    #[test]
    fn test_record_prepends() {
        let list = HistoryList::new().record(entry(1)).record(entry(2));
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].id, "id-2");
        assert_eq!(list.entries()[1].id, "id-1");
    }

    #[test]
    fn test_record_eleven_evicts_oldest() {
        let mut list = HistoryList::new();
        for n in 1..=11 {
            list = list.record(entry(n));
        }

        assert_eq!(list.len(), HISTORY_CAPACITY);
        assert_eq!(list.entries()[0].id, "id-11");
        assert_eq!(list.entries()[9].id, "id-2");
        assert!(list.get("id-1").is_none());
    }

    #[test]
    fn test_record_does_not_mutate_original() {
        let list = HistoryList::new().record(entry(1));
        let _ = list.record(entry(2));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries: Vec<HistoryEntry> = (0..15).map(entry).collect();
        let list = HistoryList::from_entries(entries);
        assert_eq!(list.len(), HISTORY_CAPACITY);
        assert_eq!(list.entries()[0].id, "id-0");
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = HistoryList::new().record(entry(1));
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "id-1");
        assert_eq!(json[0]["original"], "prompt 1");
        assert_eq!(json[0]["refined"], "refined 1");
        assert_eq!(json[0]["goal"], "General");
        assert_eq!(json[0]["timestamp"], 1_700_000_000_001i64);
    }

    #[test]
    fn test_new_entry_ids_are_unique() {
        let a = HistoryEntry::new("p", "r", RefinementGoal::Concise);
        let b = HistoryEntry::new("p", "r", RefinementGoal::Concise);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with(&a.timestamp.to_string()));
    }
}
