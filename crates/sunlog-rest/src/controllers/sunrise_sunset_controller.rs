//! Sunrise/sunset controller.

use crate::{
    extractors::ValidatedJson,
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use axum_extra::extract::Query as MultiQuery;
use serde::Deserialize;
use std::sync::Arc;
use sunlog_core::{LocationId, SunlogError, SunriseSunset, SunriseSunsetId};
use sunlog_service::{
    CreateSunriseSunsetRequest, FetchOutcome, FetchRequest, UpdateSunriseSunsetRequest,
};
use tracing::debug;

/// Creates the sunrise/sunset router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/by-date", get(get_records_by_date))
        .route("/fetch", get(fetch_record))
        .route(
            "/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// Query parameters for date filtering.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Query parameters for the external fetch endpoint.
///
/// `location_ids` may be repeated (`?location_ids=1&location_ids=2`).
#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: Option<String>,
    #[serde(default)]
    pub location_ids: Vec<i64>,
}

/// List all sunrise/sunset records.
#[utoipa::path(
    get,
    path = "/api/sunrise-sunset",
    tag = "sunrise-sunset",
    responses(
        (status = 200, description = "All records", body = Vec<SunriseSunset>)
    )
)]
pub async fn list_records(State(state): State<AppState>) -> ApiResult<Arc<Vec<SunriseSunset>>> {
    debug!("List sunrise/sunset records request");
    let records = state.sunrise_sunset_service.get_all().await?;
    ok(records)
}

/// Get a sunrise/sunset record by ID.
#[utoipa::path(
    get,
    path = "/api/sunrise-sunset/{id}",
    tag = "sunrise-sunset",
    responses(
        (status = 200, description = "The record", body = SunriseSunset),
        (status = 404, description = "No record with this id")
    )
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<SunriseSunset> {
    debug!("Get sunrise/sunset request: {}", id);
    let id = SunriseSunsetId::new(id);
    match state.sunrise_sunset_service.get_by_id(id).await? {
        Some(record) => ok(record),
        None => Err(AppError(SunlogError::not_found("SunriseSunset", id))),
    }
}

/// List records for a given date.
#[utoipa::path(
    get,
    path = "/api/sunrise-sunset/by-date",
    tag = "sunrise-sunset",
    responses(
        (status = 200, description = "Matching records", body = Vec<SunriseSunset>),
        (status = 400, description = "Missing or blank date parameter")
    )
)]
pub async fn get_records_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Arc<Vec<SunriseSunset>>> {
    let date = match query.date {
        Some(date) if !date.trim().is_empty() => date,
        _ => {
            return Err(AppError(SunlogError::validation(
                "Date parameter is required",
            )))
        }
    };

    debug!("Get sunrise/sunset by date request: {}", date);
    let records = state.sunrise_sunset_service.get_by_date(&date).await?;
    ok(records)
}

/// Fetch a reading from the external lookup API and persist it.
///
/// Coordinates fall back to the configured defaults when absent.
#[utoipa::path(
    get,
    path = "/api/sunrise-sunset/fetch",
    tag = "sunrise-sunset",
    responses(
        (status = 200, description = "Raw lookup response plus the persisted record"),
        (status = 502, description = "External lookup failed")
    )
)]
pub async fn fetch_record(
    State(state): State<AppState>,
    MultiQuery(params): MultiQuery<FetchParams>,
) -> ApiResult<FetchOutcome> {
    let latitude = params.latitude.unwrap_or(state.lookup.default_latitude);
    let longitude = params.longitude.unwrap_or(state.lookup.default_longitude);
    debug!(
        "Fetch sunrise/sunset request - lat: {}, lon: {}, date: {:?}, locations: {:?}",
        latitude, longitude, params.date, params.location_ids
    );

    let outcome = state
        .sunrise_sunset_service
        .fetch_and_persist(FetchRequest {
            latitude,
            longitude,
            date: params.date,
            location_ids: params.location_ids.into_iter().map(LocationId::new).collect(),
        })
        .await?;
    ok(outcome)
}

/// Create a new sunrise/sunset record.
#[utoipa::path(
    post,
    path = "/api/sunrise-sunset",
    tag = "sunrise-sunset",
    request_body = CreateSunriseSunsetRequest,
    responses(
        (status = 200, description = "The created record", body = SunriseSunset),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSunriseSunsetRequest>,
) -> ApiResult<SunriseSunset> {
    debug!("Create sunrise/sunset request for date: {}", request.date);
    let created = state.sunrise_sunset_service.create(request).await?;
    ok(created)
}

/// Update a sunrise/sunset record.
#[utoipa::path(
    put,
    path = "/api/sunrise-sunset/{id}",
    tag = "sunrise-sunset",
    request_body = UpdateSunriseSunsetRequest,
    responses(
        (status = 200, description = "The updated record", body = SunriseSunset),
        (status = 404, description = "No record with this id"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateSunriseSunsetRequest>,
) -> ApiResult<SunriseSunset> {
    debug!("Update sunrise/sunset request: {}", id);
    let id = SunriseSunsetId::new(id);
    match state.sunrise_sunset_service.update(id, request).await? {
        Some(record) => ok(record),
        None => Err(AppError(SunlogError::not_found("SunriseSunset", id))),
    }
}

/// Delete a sunrise/sunset record.
#[utoipa::path(
    delete,
    path = "/api/sunrise-sunset/{id}",
    tag = "sunrise-sunset",
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "No record with this id")
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete sunrise/sunset request: {}", id);
    let id = SunriseSunsetId::new(id);
    if state.sunrise_sunset_service.delete(id).await? {
        Ok(no_content())
    } else {
        Err(AppError(SunlogError::not_found("SunriseSunset", id)))
    }
}
