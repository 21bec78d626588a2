//! In-memory record source for hosts and tests without a device.

use crate::types::{FieldTag, RecordId};

use super::traits::{RecordSource, SourceError, SourceRecord};

const ERR_BAD_INDEX: u16 = 2;

/// A record held fully in memory as tag/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemRecord {
    fields: Vec<(FieldTag, String)>,
}

impl MemRecord {
    /// Builds a record from tag/value pairs.
    pub fn with_fields(fields: impl IntoIterator<Item = (FieldTag, String)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}

impl SourceRecord for MemRecord {
    fn get_field(&self, tag: FieldTag) -> Result<Option<String>, SourceError> {
        Ok(self
            .fields
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, v)| v.clone()))
    }

    fn set_field(&mut self, tag: FieldTag, value: &str) -> Result<(), SourceError> {
        if let Some(slot) = self.fields.iter_mut().find(|(t, _)| *t == tag) {
            slot.1 = value.to_string();
        } else {
            self.fields.push((tag, value.to_string()));
        }
        Ok(())
    }
}

/// Infallible [`RecordSource`] backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemRecordSource {
    records: Vec<MemRecord>,
}

impl MemRecordSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source pre-populated with committed records.
    pub fn with_records(records: Vec<MemRecord>) -> Self {
        Self { records }
    }

    /// Committed records in commit order.
    pub fn records(&self) -> &[MemRecord] {
        &self.records
    }
}

impl RecordSource for MemRecordSource {
    type Record = MemRecord;

    fn count(&self) -> Result<usize, SourceError> {
        Ok(self.records.len())
    }

    fn record(&self, index: usize) -> Result<MemRecord, SourceError> {
        self.records
            .get(index)
            .cloned()
            .ok_or_else(|| SourceError::new(ERR_BAD_INDEX, format!("no record at index {index}")))
    }

    fn add_record(&mut self) -> Result<MemRecord, SourceError> {
        Ok(MemRecord::default())
    }

    fn commit(&mut self, record: MemRecord) -> Result<RecordId, SourceError> {
        self.records.push(record);
        Ok(self.records.len() as RecordId)
    }
}
