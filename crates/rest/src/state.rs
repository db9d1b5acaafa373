//! Application state for the HTTP API.
//!
//! Shared across all request handlers: the patient store handle (patient
//! CRUD bypasses the record service and talks to the document store
//! directly), the record service, and the server configuration.

use std::sync::Arc;

use molar_service::RecordService;
use molar_store::{PatientStorage, RecordStorage};

use crate::config::ServerConfig;

/// Shared application state.
///
/// # Type Parameters
///
/// * `P` - the patient store ([`PatientStorage`])
/// * `R` - the record store ([`RecordStorage`])
pub struct AppState<P, R> {
    patients: Arc<P>,
    service: RecordService<P, R>,
    config: Arc<ServerConfig>,
}

// Manually implement Clone since the stores are behind Arcs and need not
// be Clone themselves.
impl<P, R> Clone for AppState<P, R> {
    fn clone(&self) -> Self {
        Self {
            patients: Arc::clone(&self.patients),
            service: self.service.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<P: PatientStorage, R: RecordStorage> AppState<P, R> {
    /// Creates a new AppState.
    pub fn new(patients: Arc<P>, service: RecordService<P, R>, config: ServerConfig) -> Self {
        Self {
            patients,
            service,
            config: Arc::new(config),
        }
    }

    /// The patient document store.
    pub fn patients(&self) -> &P {
        &self.patients
    }

    /// The record service.
    pub fn service(&self) -> &RecordService<P, R> {
        &self.service
    }

    /// The server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The base URL used in Location headers.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
