//! One-way synchronization between the contact store and a record source.

/// Strategy selection, the sync pass, and outcome reporting.
pub mod engine;
/// In-memory record source.
pub mod mem;
/// Collaborator traits for record sources and progress/error sinks.
pub mod traits;
