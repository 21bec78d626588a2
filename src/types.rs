//! Shared primitive types and field tags.

use serde::{Deserialize, Serialize};

/// Identifier a record source assigns when a record is committed.
pub type RecordId = u64;

/// Typed field tags understood by external record sources.
///
/// The discriminants are the numeric tags used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldTag {
    /// Given name.
    FirstName = 1,
    /// Family name.
    LastName = 2,
    /// Email address.
    Email = 3,
}

impl FieldTag {
    /// Numeric tag value as a record source addresses it.
    pub fn code(self) -> u16 {
        self as u16
    }
}
