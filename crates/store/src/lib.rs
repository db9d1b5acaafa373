//! # molar-store - Persistence Layer
//!
//! Two physically separate stores back the Molar dental records server:
//!
//! - [`SledPatientStore`] - an embedded document store holding
//!   [`Patient`](molar_model::Patient) entities, keyed by their generated
//!   identifier. Provides lookup-by-id and substring search.
//! - [`SqliteRecordStore`] - a relational store holding
//!   [`PatientRecord`](molar_model::PatientRecord) entities, keyed by an
//!   auto-incrementing integer, with a non-enforced reference to a patient
//!   identifier.
//!
//! No transaction spans the two stores and no join happens at the storage
//! layer; cross-store concerns live in the record service above this
//! crate. Each adapter relies on its engine's own locking - the document
//! store serializes access internally, the relational store hands out
//! pooled connections guarded by SQLite's transaction machinery.
//!
//! The [`PatientStorage`] and [`RecordStorage`] traits are the seams the
//! service and HTTP layers program against; the two concrete adapters are
//! the only in-tree implementations.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod core;
pub mod document;
pub mod error;
pub mod relational;

pub use crate::core::{PatientStorage, RecordStorage};
pub use crate::document::SledPatientStore;
pub use crate::error::{StoreError, StoreResult};
pub use crate::relational::{SqliteRecordStore, SqliteStoreConfig};
