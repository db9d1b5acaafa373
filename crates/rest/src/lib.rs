//! # molar-rest - HTTP API
//!
//! The HTTP layer of the Molar dental records server. Every endpoint is a
//! direct mapping from a request to a single store or service call:
//! patient CRUD talks straight to the document store, record endpoints go
//! through the record service (which validates the cross-store patient
//! reference at creation time).
//!
//! ## API Endpoints
//!
//! | Method & Path | Purpose |
//! |---------------|---------|
//! | GET /patients | list all patients |
//! | GET /patients/{id} | fetch one patient |
//! | GET /patients/search?q= | id or name-substring search |
//! | POST /patients | create patient |
//! | PUT /patients/{id} | replace patient |
//! | DELETE /patients/{id} | remove patient |
//! | GET /patients/{patientId}/records | list records for patient |
//! | POST /patients/{patientId}/records | create record |
//! | GET /patients/{patientId}/records/details | combined patient+records view |
//! | GET /records/{recordId} | fetch one record |
//! | PUT /records/{recordId} | replace record |
//! | DELETE /records/{recordId} | remove record |
//! | GET /health | health check |
//!
//! ## Status Codes
//!
//! | HTTP Status | Meaning |
//! |-------------|---------|
//! | 200 | found / updated |
//! | 201 | created (with Location header) |
//! | 204 | deleted |
//! | 400 | id mismatch between path and body, missing query param, field over limit |
//! | 404 | not found / referenced patient missing on create |
//! | 500 | store failure (no internal detail leaked) |
//!
//! ## Configuration
//!
//! The server is configured via CLI flags or `MOLAR_*` environment
//! variables; see [`ServerConfig`].
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and JSON error envelope
//! - [`state`] - Application state (store handles, service, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use molar_service::RecordService;
use molar_store::{PatientStorage, RecordStorage};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function; for more control, use
/// [`create_app_with_config`].
pub fn create_app<P, R>(patients: Arc<P>, records: Arc<R>) -> Router
where
    P: PatientStorage + 'static,
    R: RecordStorage + 'static,
{
    create_app_with_config(patients, records, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Assembles the record service over the given store handles, the router,
/// and the middleware stack (tracing, timeout, optional CORS).
pub fn create_app_with_config<P, R>(
    patients: Arc<P>,
    records: Arc<R>,
    config: ServerConfig,
) -> Router
where
    P: PatientStorage + 'static,
    R: RecordStorage + 'static,
{
    info!(
        patient_store = patients.store_name(),
        record_store = records.store_name(),
        "creating REST API"
    );

    let service = RecordService::new(Arc::clone(&patients), records);
    let state = AppState::new(patients, service, config.clone());

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            config.request_timeout,
        )));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http=debug")));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
