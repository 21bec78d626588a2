//! Collaborator interfaces the synchronizer is driven against.
//!
//! Any host integration supplies these three seams: an external record
//! collection, a progress sink, and an error sink. The synchronizer owns no
//! activation lifecycle of its own.

use std::fmt;

use crate::types::{FieldTag, RecordId};

/// Failure communicating with an external record source.
///
/// Carries the source's numeric error code plus a short description; this
/// pair is exactly what an [`ErrorSink`] presents to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    /// Source-defined numeric error code.
    pub code: u16,
    /// Human-readable description.
    pub message: String,
}

impl SourceError {
    /// Builds an error from a code and description.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record source error [{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for SourceError {}

/// One external record addressed through typed field tags.
pub trait SourceRecord {
    /// Reads a tagged field.
    ///
    /// `Ok(None)` means the record has no value for this tag, a normal
    /// condition distinct from a read failure.
    fn get_field(&self, tag: FieldTag) -> Result<Option<String>, SourceError>;

    /// Writes a tagged field.
    fn set_field(&mut self, tag: FieldTag, value: &str) -> Result<(), SourceError>;
}

/// An ordered, possibly-empty external record collection.
///
/// Records are committed individually; a record obtained from
/// [`RecordSource::add_record`] is not visible in the collection until it is
/// passed to [`RecordSource::commit`].
pub trait RecordSource {
    /// Record type this source hands out.
    type Record: SourceRecord;

    /// Number of records currently in the collection.
    fn count(&self) -> Result<usize, SourceError>;

    /// Reads the record at 0-based `index`.
    fn record(&self, index: usize) -> Result<Self::Record, SourceError>;

    /// Creates a new, uncommitted record.
    fn add_record(&mut self) -> Result<Self::Record, SourceError>;

    /// Commits a record created by [`RecordSource::add_record`] and returns
    /// its assigned identifier.
    fn commit(&mut self, record: Self::Record) -> Result<RecordId, SourceError>;
}

/// Receives item counts and positions while a sync pass runs.
pub trait ProgressSink {
    /// Announces the total number of items the pass will touch.
    fn begin(&mut self, total: usize);

    /// Announces the position of the item currently being processed.
    fn position(&mut self, index: usize);
}

impl ProgressSink for () {
    fn begin(&mut self, _total: usize) {}

    fn position(&mut self, _index: usize) {}
}

/// Receives the single user-visible notification when a sync pass aborts.
pub trait ErrorSink {
    /// Presents `code` and `message`; must not alter sync control flow.
    fn report(&mut self, code: u16, message: &str);
}

impl ErrorSink for () {
    fn report(&mut self, _code: u16, _message: &str) {}
}
