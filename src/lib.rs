//! Persisted XML contact store with one-way device synchronization.
//!
//! # Examples
//!
//! Store usage with [`store::contacts::ContactStore`]:
//! ```no_run
//! use contactsync::{
//!     contact::Contact,
//!     store::contacts::{ContactStore, DATA_FILE},
//! };
//!
//! let mut store = ContactStore::load(DATA_FILE).expect("load");
//! store.put(&Contact::new("Jane", "Doe", "jane@example.com"));
//! assert!(store.contains("Jane", "Doe"));
//! store.save().expect("save");
//! ```
//!
//! A sync pass against an in-memory record source:
//! ```no_run
//! use contactsync::{
//!     store::contacts::ContactStore,
//!     sync::{engine::sync, mem::MemRecordSource},
//! };
//!
//! let mut store = ContactStore::load("ContactList.xml").expect("load");
//! let mut source = MemRecordSource::new();
//! let outcome = sync(&mut store, &mut source, &mut (), &mut ());
//! assert!(outcome.source_error.is_none());
//! ```
#![deny(missing_docs)]

/// Contact domain record.
pub mod contact;
/// Persisted contact store over an XML document tree.
pub mod store;
/// Synchronizer, collaborator traits, and in-memory source.
pub mod sync;
/// Shared primitive types and field tags.
pub mod types;
