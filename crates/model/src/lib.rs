//! # molar-model - Core Data Model
//!
//! Shared entity types for the Molar dental records server.
//!
//! Two kinds of entity exist, each owned by a different store:
//!
//! - [`Patient`] - lives in the embedded document store, keyed by a
//!   generated unique identifier.
//! - [`PatientRecord`] - lives in the relational store, keyed by a
//!   store-assigned sequential integer, referencing a patient by id.
//!
//! There is no foreign key between the two: the stores are physically
//! separate systems, and the reference is validated by the record service
//! at creation time only.
//!
//! Creation payloads use draft types ([`PatientDraft`], [`RecordDraft`])
//! so that store-assigned identifiers cannot be smuggled in by callers.
//! All wire names are camelCase.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod limits;
pub mod patient;
pub mod record;

pub use patient::{Patient, PatientDraft, PatientSummary};
pub use record::{FieldTooLong, PatientChart, PatientRecord, RecordDraft};
