//! Single-pass, one-way merge between the store and a record source.

use log::{info, warn};

use crate::contact::Contact;
use crate::store::contacts::{ContactStore, SaveError};
use crate::types::FieldTag;

use super::traits::{ErrorSink, ProgressSink, RecordSource, SourceError, SourceRecord};

/// Which of the two mutually exclusive strategies a pass executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The source was empty; store contents were copied outward.
    Push,
    /// The source had records; they were merged inward, additive and
    /// non-deleting.
    Pull,
}

/// What a completed pass did, including any swallowed failures.
///
/// [`sync`] never returns an error to its caller: a source failure is
/// reported once through the error sink and a pull-save failure is not
/// reported at all. Both remain visible here for callers that want them,
/// and the whole outcome is safely ignorable.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Strategy the pass selected, or `None` when the source count itself
    /// could not be read.
    pub strategy: Option<Strategy>,
    /// Records fully processed before completion or abort.
    pub processed: usize,
    /// Source failure that aborted the pass, already sent to the error sink.
    pub source_error: Option<SourceError>,
    /// Pull-strategy save failure; never sent to the error sink.
    pub save_error: Option<SaveError>,
}

/// Runs one synchronization pass between `store` and `source`.
///
/// An empty source selects the push strategy: every store contact is copied
/// out as a new committed record and the store file is left untouched on
/// disk. A non-empty source selects the pull strategy: every source record
/// is upserted into the store (a missing field tag reads as `""`), entries
/// absent from the source are kept, and the store is saved back to its load
/// path afterwards.
///
/// Any [`SourceError`] aborts the remaining iteration of the current
/// strategy, is reported once through `errors`, and still yields a normal
/// return. Each invocation is a single stateless pass on the calling thread.
pub fn sync<S, P, E>(
    store: &mut ContactStore,
    source: &mut S,
    progress: &mut P,
    errors: &mut E,
) -> SyncOutcome
where
    S: RecordSource,
    P: ProgressSink,
    E: ErrorSink,
{
    let mut outcome = SyncOutcome {
        strategy: None,
        processed: 0,
        source_error: None,
        save_error: None,
    };

    let count = match source.count() {
        Ok(count) => count,
        Err(err) => {
            warn!("sync aborted reading source count: {err}");
            errors.report(err.code, &err.message);
            outcome.source_error = Some(err);
            return outcome;
        }
    };

    let strategy = if count == 0 {
        Strategy::Push
    } else {
        Strategy::Pull
    };
    outcome.strategy = Some(strategy);
    info!("sync pass selected {strategy:?} (source count {count})");

    let result = match strategy {
        Strategy::Push => push(store, source, progress, &mut outcome.processed),
        Strategy::Pull => pull(store, source, progress, count, &mut outcome.processed),
    };

    if let Err(err) = result {
        warn!(
            "sync {strategy:?} aborted after {} records: {err}",
            outcome.processed
        );
        errors.report(err.code, &err.message);
        outcome.source_error = Some(err);
        return outcome;
    }

    if strategy == Strategy::Pull {
        // the save result is deliberately not routed to the error sink
        outcome.save_error = store.save().err();
        if let Some(err) = &outcome.save_error {
            warn!("post-pull save failed: {err}");
        }
    }

    outcome
}

/// Copies every store contact outward as a new committed record.
fn push<S, P>(
    store: &ContactStore,
    source: &mut S,
    progress: &mut P,
    processed: &mut usize,
) -> Result<(), SourceError>
where
    S: RecordSource,
    P: ProgressSink,
{
    let contacts = store.get_all();
    progress.begin(contacts.len());
    for (index, contact) in contacts.iter().enumerate() {
        progress.position(index);
        let mut record = source.add_record()?;
        record.set_field(FieldTag::FirstName, &contact.first_name)?;
        record.set_field(FieldTag::LastName, &contact.last_name)?;
        record.set_field(FieldTag::Email, &contact.email)?;
        source.commit(record)?;
        *processed += 1;
    }
    Ok(())
}

/// Upserts every source record into the store; positions report 1-based.
fn pull<S, P>(
    store: &mut ContactStore,
    source: &S,
    progress: &mut P,
    count: usize,
    processed: &mut usize,
) -> Result<(), SourceError>
where
    S: RecordSource,
    P: ProgressSink,
{
    progress.begin(count);
    for position in 1..=count {
        progress.position(position);
        let record = source.record(position - 1)?;
        let contact = Contact {
            first_name: record.get_field(FieldTag::FirstName)?.unwrap_or_default(),
            last_name: record.get_field(FieldTag::LastName)?.unwrap_or_default(),
            email: record.get_field(FieldTag::Email)?.unwrap_or_default(),
        };
        let _ = store.put(&contact);
        *processed += 1;
    }
    Ok(())
}
