//! Route configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use molar_store::{PatientStorage, RecordStorage};

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Patients
/// - `GET /patients` - List all patients
/// - `POST /patients` - Create patient
/// - `GET /patients/search` - Search by id or name fragment
/// - `GET /patients/{id}` - Fetch one patient
/// - `PUT /patients/{id}` - Replace patient
/// - `DELETE /patients/{id}` - Remove patient
///
/// ## Records
/// - `GET /patients/{id}/records` - List records for patient
/// - `POST /patients/{id}/records` - Create record
/// - `GET /patients/{id}/records/details` - Combined view
/// - `GET /records/{id}` - Fetch one record
/// - `PUT /records/{id}` - Replace record
/// - `DELETE /records/{id}` - Remove record
///
/// ## System
/// - `GET /health` - Health check
pub fn create_routes<P, R>(state: AppState<P, R>) -> Router
where
    P: PatientStorage + 'static,
    R: RecordStorage + 'static,
{
    // The router requires one parameter name per path position, so every
    // route under /patients/ uses {id}.
    Router::new()
        // System routes
        .route("/health", get(handlers::health_handler::<P, R>))
        // Patient routes
        .route("/patients", get(handlers::list_patients::<P, R>))
        .route("/patients", post(handlers::create_patient::<P, R>))
        .route("/patients/search", get(handlers::search_patients::<P, R>))
        .route("/patients/{id}", get(handlers::get_patient::<P, R>))
        .route("/patients/{id}", put(handlers::update_patient::<P, R>))
        .route("/patients/{id}", delete(handlers::delete_patient::<P, R>))
        // Record routes
        .route(
            "/patients/{id}/records",
            get(handlers::list_patient_records::<P, R>),
        )
        .route(
            "/patients/{id}/records",
            post(handlers::create_record::<P, R>),
        )
        .route(
            "/patients/{id}/records/details",
            get(handlers::patient_chart::<P, R>),
        )
        .route("/records/{id}", get(handlers::get_record::<P, R>))
        .route("/records/{id}", put(handlers::update_record::<P, R>))
        .route("/records/{id}", delete(handlers::delete_record::<P, R>))
        // State
        .with_state(state)
}
