//! Contact domain record.

use serde::{Deserialize, Serialize};

/// A single address-book entry keyed by first and last name.
///
/// Identity is the `(first_name, last_name)` pair under exact,
/// case-sensitive, untrimmed string comparison. Equality compares all three
/// fields. A contact read from a source without an email carries `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Contact {
    /// Given name; half of the identity key.
    pub first_name: String,
    /// Family name; the other half of the identity key.
    pub last_name: String,
    /// Email address, possibly empty.
    pub email: String,
}

impl Contact {
    /// Builds a contact from its three fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Identity key used by store lookups.
    pub fn key(&self) -> (&str, &str) {
        (&self.first_name, &self.last_name)
    }
}
