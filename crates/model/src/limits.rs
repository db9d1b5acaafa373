//! Maximum lengths for the bounded free-text fields of a clinical record.
//!
//! The limits match the column widths declared by the relational store's
//! schema. Overflow is rejected before anything touches storage, with the
//! offending field named in the error.
//!
//! | Field | Maximum characters |
//! |-------|--------------------|
//! | `recordType` | 50 |
//! | `description` | 1000 |
//! | `treatment` | 1000 |
//! | `diagnosis` | 1000 |
//! | `prescription` | 500 |
//! | `notes` | 2000 |
//! | `dentistName` | 100 |

/// Maximum length of `recordType`.
pub const RECORD_TYPE_MAX: usize = 50;

/// Maximum length of `description`.
pub const DESCRIPTION_MAX: usize = 1000;

/// Maximum length of `treatment`.
pub const TREATMENT_MAX: usize = 1000;

/// Maximum length of `diagnosis`.
pub const DIAGNOSIS_MAX: usize = 1000;

/// Maximum length of `prescription`.
pub const PRESCRIPTION_MAX: usize = 500;

/// Maximum length of `notes`.
pub const NOTES_MAX: usize = 2000;

/// Maximum length of `dentistName`.
pub const DENTIST_NAME_MAX: usize = 100;
