//! Official handicap index history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EntityId;

/// One recorded change of the official handicap index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandicapHistoryEntry {
    /// Unique identifier (derived from effective date + index)
    pub id: EntityId,

    pub handicap_index: f64,

    /// Date from which this index applies
    pub effective_date: NaiveDate,

    #[serde(default)]
    pub notes: Option<String>,
}

impl HandicapHistoryEntry {
    pub fn new(handicap_index: f64, effective_date: NaiveDate) -> Self {
        let id = EntityId::generate(&[
            &effective_date.to_string(),
            &format!("{:.1}", handicap_index),
        ]);
        Self {
            id,
            handicap_index,
            effective_date,
            notes: None,
        }
    }

    /// Builder method to set notes.
    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }
}

/// Index history, kept sorted by effective date.
#[derive(Debug, Clone, Default)]
pub struct HandicapHistory {
    entries: Vec<HandicapHistoryEntry>,
}

impl HandicapHistory {
    pub fn new(mut entries: Vec<HandicapHistoryEntry>) -> Self {
        entries.sort_by_key(|e| e.effective_date);
        Self { entries }
    }

    /// Most recent entry.
    pub fn current(&self) -> Option<&HandicapHistoryEntry> {
        self.entries.last()
    }

    /// Entry in effect on a date: the latest one effective on or before it.
    pub fn entry_at(&self, date: NaiveDate) -> Option<&HandicapHistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.effective_date <= date)
            .max_by_key(|e| e.effective_date)
    }

    /// Handicap index in effect on a date.
    pub fn index_at(&self, date: NaiveDate) -> Option<f64> {
        self.entry_at(date).map(|e| e.handicap_index)
    }

    pub fn entries(&self) -> &[HandicapHistoryEntry] {
        &self.entries
    }

    /// Add an entry, keeping the history sorted.
    pub fn add(&mut self, entry: HandicapHistoryEntry) {
        self.entries.push(entry);
        self.entries.sort_by_key(|e| e.effective_date);
    }
}
