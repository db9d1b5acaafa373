//! Clinical record handlers.
//!
//! Record operations go through the record service, which owns the
//! cross-store patient-reference check and timestamp normalization.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use molar_model::{PatientChart, PatientRecord, RecordDraft};
use molar_store::{PatientStorage, RecordStorage};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handler for listing a patient's records.
///
/// A pure filter: an unknown patient id yields an empty list, not a 404.
///
/// # HTTP Request
///
/// `GET /patients/{patientId}/records`
///
/// # Response
///
/// - `200 OK` - The patient's records, most recent visit first
pub async fn list_patient_records<P, R>(
    State(state): State<AppState<P, R>>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<Vec<PatientRecord>>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    let records = state.service().records_for_patient(&patient_id).await?;
    debug!(patient_id = %patient_id, count = records.len(), "listed records");
    Ok(Json(records))
}

/// Handler for fetching a single record.
///
/// # HTTP Request
///
/// `GET /records/{recordId}`
///
/// # Response
///
/// - `200 OK` - Record found
/// - `404 Not Found` - No record with that id
pub async fn get_record<P, R>(
    State(state): State<AppState<P, R>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PatientRecord>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    match state.service().get_record(id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound {
            kind: "record",
            id: id.to_string(),
        }),
    }
}

/// Handler for creating a clinical record.
///
/// The patient id in the URL path wins over any patient id in the body.
/// The referenced patient must exist; the visit timestamp is normalized to
/// UTC and defaults to now.
///
/// # HTTP Request
///
/// `POST /patients/{patientId}/records`
///
/// # Response
///
/// - `201 Created` - Record created, Location header set
/// - `400 Bad Request` - A bounded field over its limit
/// - `404 Not Found` - Referenced patient does not exist
pub async fn create_record<P, R>(
    State(state): State<AppState<P, R>>,
    Path(patient_id): Path<String>,
    Json(draft): Json<RecordDraft>,
) -> ApiResult<Response>
where
    P: PatientStorage,
    R: RecordStorage,
{
    let record = state.service().create_record(&patient_id, draft).await?;

    debug!(id = record.id, patient_id = %patient_id, "record created");
    let location = format!("{}/records/{}", state.base_url(), record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    )
        .into_response())
}

/// Handler for replacing a record.
///
/// The id in the URL path is authoritative; a body id, when present, must
/// agree with it. `patientId` cannot be changed, and patient existence is
/// not re-validated here - it is checked at creation only.
///
/// # HTTP Request
///
/// `PUT /records/{recordId}`
///
/// # Response
///
/// - `200 OK` - Record replaced
/// - `400 Bad Request` - Path/body id mismatch, or a field over its limit
/// - `404 Not Found` - No record with that id
pub async fn update_record<P, R>(
    State(state): State<AppState<P, R>>,
    Path(id): Path<i64>,
    Json(draft): Json<RecordDraft>,
) -> ApiResult<Json<PatientRecord>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    if let Some(body_id) = draft.id {
        if body_id != id {
            return Err(ApiError::BadRequest {
                message: format!("record id in body ({body_id}) does not match URL ({id})"),
            });
        }
    }

    let record = state.service().update_record(id, draft).await?;
    debug!(id, "record updated");
    Ok(Json(record))
}

/// Handler for removing a record.
///
/// # HTTP Request
///
/// `DELETE /records/{recordId}`
///
/// # Response
///
/// - `204 No Content` - Record deleted
/// - `404 Not Found` - No record with that id
pub async fn delete_record<P, R>(
    State(state): State<AppState<P, R>>,
    Path(id): Path<i64>,
) -> ApiResult<Response>
where
    P: PatientStorage,
    R: RecordStorage,
{
    if !state.service().delete_record(id).await? {
        return Err(ApiError::NotFound {
            kind: "record",
            id: id.to_string(),
        });
    }

    debug!(id, "record deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for the combined patient + records view.
///
/// Two independent fetches joined in application memory; the stores cannot
/// be joined at the storage layer.
///
/// # HTTP Request
///
/// `GET /patients/{patientId}/records/details`
///
/// # Response
///
/// - `200 OK` - Patient summary with records (possibly empty)
/// - `404 Not Found` - No patient with that id
pub async fn patient_chart<P, R>(
    State(state): State<AppState<P, R>>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<PatientChart>>
where
    P: PatientStorage,
    R: RecordStorage,
{
    match state.service().patient_chart(&patient_id).await? {
        Some(chart) => Ok(Json(chart)),
        None => Err(ApiError::NotFound {
            kind: "patient",
            id: patient_id,
        }),
    }
}
