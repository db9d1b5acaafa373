//! Patient CRUD handlers.
//!
//! Patient operations talk straight to the document store; the record
//! service is not involved.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use molar_model::{Patient, PatientDraft};
use molar_store::{PatientStorage, RecordStorage};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handler for listing all patients.
///
/// # HTTP Request
///
/// `GET /patients`
///
/// # Response
///
/// - `200 OK` - All patients (possibly empty)
pub async fn list_patients<P, R>(
    State(state): State<AppState<P, R>>,
) -> ApiResult<Json<Vec<Patient>>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    let patients = state.patients().list().await?;
    debug!(count = patients.len(), "listed patients");
    Ok(Json(patients))
}

/// Handler for fetching a single patient.
///
/// # HTTP Request
///
/// `GET /patients/{id}`
///
/// # Response
///
/// - `200 OK` - Patient found
/// - `404 Not Found` - No patient with that id
pub async fn get_patient<P, R>(
    State(state): State<AppState<P, R>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Patient>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    debug!(id = %id, "reading patient");
    match state.patients().get(&id).await? {
        Some(patient) => Ok(Json(patient)),
        None => Err(ApiError::NotFound { kind: "patient", id }),
    }
}

/// Query parameters for patient search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Patient id or name fragment. Required.
    pub q: Option<String>,
}

/// Handler for patient search.
///
/// An exact id match returns exactly that patient; otherwise the query is
/// matched case-insensitively against first, last, and full names.
///
/// # HTTP Request
///
/// `GET /patients/search?q=smith`
///
/// # Response
///
/// - `200 OK` - Matching patients (possibly empty)
/// - `400 Bad Request` - Missing or empty `q` parameter
pub async fn search_patients<P, R>(
    State(state): State<AppState<P, R>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Patient>>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    let Some(query) = params.q.filter(|q| !q.is_empty()) else {
        return Err(ApiError::BadRequest {
            message: "missing required query parameter `q`".to_string(),
        });
    };

    debug!(query = %query, "searching patients");
    let matches = state.patients().search(&query).await?;
    Ok(Json(matches))
}

/// Handler for creating a patient.
///
/// The id is generated when the body does not carry one.
///
/// # HTTP Request
///
/// `POST /patients`
///
/// # Response
///
/// - `201 Created` - Patient created, Location header set
pub async fn create_patient<P, R>(
    State(state): State<AppState<P, R>>,
    Json(draft): Json<PatientDraft>,
) -> ApiResult<Response>
where
    P: PatientStorage,
    R: RecordStorage,
{
    let patient = draft.into_patient();
    state.patients().insert(&patient).await?;

    debug!(id = %patient.id, "patient created");
    let location = format!("{}/patients/{}", state.base_url(), patient.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(patient),
    )
        .into_response())
}

/// Handler for replacing a patient.
///
/// The id in the URL path is authoritative; a body id, when present, must
/// agree with it. The patient must already exist - this is not an upsert.
///
/// # HTTP Request
///
/// `PUT /patients/{id}`
///
/// # Response
///
/// - `200 OK` - Patient replaced
/// - `400 Bad Request` - Path/body id mismatch
/// - `404 Not Found` - No patient with that id
pub async fn update_patient<P, R>(
    State(state): State<AppState<P, R>>,
    Path(id): Path<String>,
    Json(draft): Json<PatientDraft>,
) -> ApiResult<Json<Patient>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    if let Some(body_id) = &draft.id {
        if !body_id.is_empty() && *body_id != id {
            return Err(ApiError::BadRequest {
                message: format!("patient id in body ({body_id}) does not match URL ({id})"),
            });
        }
    }

    let patient = draft.with_id(id.clone());
    if !state.patients().replace(&patient).await? {
        return Err(ApiError::NotFound { kind: "patient", id });
    }

    debug!(id = %patient.id, "patient updated");
    Ok(Json(patient))
}

/// Handler for removing a patient.
///
/// Existing clinical records referencing the patient are left in place;
/// there is no cascade across the two stores.
///
/// # HTTP Request
///
/// `DELETE /patients/{id}`
///
/// # Response
///
/// - `204 No Content` - Patient deleted
/// - `404 Not Found` - No patient with that id
pub async fn delete_patient<P, R>(
    State(state): State<AppState<P, R>>,
    Path(id): Path<String>,
) -> ApiResult<Response>
where
    P: PatientStorage,
    R: RecordStorage,
{
    if !state.patients().delete(&id).await? {
        return Err(ApiError::NotFound { kind: "patient", id });
    }

    debug!(id = %id, "patient deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
