use crate::common::types::AttractionRecord;
use std::collections::HashSet;
use tracing::trace;

/// Ordered attraction records plus the set of names already taken.
///
/// `try_add` is the only way in, so `seen_names` always mirrors the names in
/// `records` and no two records share a name. The first record to claim a
/// name keeps it.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<AttractionRecord>,
    seen_names: HashSet<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless its name is empty or already stored.
    pub fn try_add(&mut self, record: AttractionRecord) -> bool {
        if record.name.is_empty() || self.seen_names.contains(&record.name) {
            trace!(name = %record.name, "dropping duplicate or empty name");
            return false;
        }
        self.seen_names.insert(record.name.clone());
        self.records.push(record);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen_names.contains(name)
    }

    /// Read-only view in discovery order.
    pub fn records(&self) -> &[AttractionRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttractionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn seen_count(&self) -> usize {
        self.seen_names.len()
    }
}

impl From<RecordStore> for Vec<AttractionRecord> {
    fn from(store: RecordStore) -> Self {
        store.records
    }
}
