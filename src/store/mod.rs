//! Persisted contact store over an XML document tree.

/// Contact store, document constants, and load/save errors.
pub mod contacts;
