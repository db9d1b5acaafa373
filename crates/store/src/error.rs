//! Error types for the persistence layer.
//!
//! Absence is not an error at this layer: lookups return `Option` and
//! deletes return a found-flag. `StoreError` covers engine-level failures
//! only, with the owning store named in every variant so a failure can be
//! attributed without a backtrace.

use thiserror::Error;

/// The primary error type for all store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be opened or a connection could not be obtained.
    #[error("{store} store connection failed: {message}")]
    ConnectionFailed {
        /// Name of the failing store.
        store: &'static str,
        /// Engine-reported detail.
        message: String,
    },

    /// A stored value could not be encoded or decoded.
    #[error("{store} store serialization error: {message}")]
    Serialization {
        /// Name of the failing store.
        store: &'static str,
        /// Engine-reported detail.
        message: String,
    },

    /// Any other engine-level failure.
    #[error("{store} store error: {message}")]
    Internal {
        /// Name of the failing store.
        store: &'static str,
        /// Engine-reported detail.
        message: String,
    },
}

impl StoreError {
    /// A connection-level failure in the named store.
    pub fn connection(store: &'static str, err: impl std::fmt::Display) -> Self {
        Self::ConnectionFailed {
            store,
            message: err.to_string(),
        }
    }

    /// A value-encoding failure in the named store.
    pub fn serialization(store: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            store,
            message: err.to_string(),
        }
    }

    /// Any other failure in the named store.
    pub fn internal(store: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Internal {
            store,
            message: err.to_string(),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
