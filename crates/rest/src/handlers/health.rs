//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use molar_store::{PatientStorage, RecordStorage};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Server is healthy, with the two store names and a
///   timestamp in the body
pub async fn health_handler<P, R>(State(state): State<AppState<P, R>>) -> ApiResult<Response>
where
    P: PatientStorage,
    R: RecordStorage,
{
    debug!("Processing health check request");

    let body = serde_json::json!({
        "status": "healthy",
        "patientStore": state.patients().store_name(),
        "recordStore": state.service().records().store_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok((StatusCode::OK, Json(body)).into_response())
}
