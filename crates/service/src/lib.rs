//! # molar-service - Record Service
//!
//! The one component of the Molar dental records server with actual
//! logic. [`RecordService`] sits between the two stores and owns:
//!
//! - the cross-store referential-integrity check: a clinical record is
//!   only ever created for a patient that exists in the document store at
//!   creation time;
//! - timestamp normalization: visit dates are persisted in UTC whatever
//!   offset the caller supplied;
//! - the in-memory join of a patient summary with that patient's records
//!   (the stores cannot be joined at the storage layer);
//! - the demo-data bootstrap that fills empty stores with synthetic
//!   patients and visits at first startup.
//!
//! Patient CRUD does not pass through this crate; the HTTP layer talks to
//! the document store directly for those operations.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bootstrap;
mod error;
mod records;

pub use bootstrap::SeedReport;
pub use error::{ServiceError, ServiceResult};
pub use records::RecordService;
