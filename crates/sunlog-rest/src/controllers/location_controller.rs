//! Location controller.

use crate::{
    extractors::ValidatedJson,
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use sunlog_core::{Location, LocationId, SunlogError};
use sunlog_service::{BulkLocationRequest, CreateLocationRequest, UpdateLocationRequest};
use tracing::debug;

/// Creates the location router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route("/bulk", post(bulk_create_or_update))
        .route("/by-date", get(get_locations_by_date))
        .route(
            "/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
}

/// Query parameters for date filtering.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// List all locations.
#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "locations",
    responses(
        (status = 200, description = "All locations", body = Vec<Location>)
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Arc<Vec<Location>>> {
    debug!("List locations request");
    let locations = state.location_service.get_all().await?;
    ok(locations)
}

/// Get a location by ID.
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    tag = "locations",
    responses(
        (status = 200, description = "The location", body = Location),
        (status = 404, description = "No location with this id")
    )
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Location> {
    debug!("Get location request: {}", id);
    let id = LocationId::new(id);
    match state.location_service.get_by_id(id).await? {
        Some(location) => ok(location),
        None => Err(AppError(SunlogError::not_found("Location", id))),
    }
}

/// List locations having a sunrise/sunset record on the given date.
#[utoipa::path(
    get,
    path = "/api/locations/by-date",
    tag = "locations",
    responses(
        (status = 200, description = "Matching locations", body = Vec<Location>),
        (status = 400, description = "Missing or blank date parameter")
    )
)]
pub async fn get_locations_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Arc<Vec<Location>>> {
    let date = match query.date {
        Some(date) if !date.trim().is_empty() => date,
        _ => {
            return Err(AppError(SunlogError::validation(
                "Date parameter is required",
            )))
        }
    };

    debug!("Get locations by date request: {}", date);
    let locations = state.location_service.get_by_date(&date).await?;
    ok(locations)
}

/// Create a new location.
#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 200, description = "The created location", body = Location),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateLocationRequest>,
) -> ApiResult<Location> {
    debug!("Create location request: {}", request.name);
    let created = state.location_service.create(request).await?;
    ok(created)
}

/// Update a location.
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    tag = "locations",
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "The updated location", body = Location),
        (status = 404, description = "No location with this id"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateLocationRequest>,
) -> ApiResult<Location> {
    debug!("Update location request: {}", id);
    let id = LocationId::new(id);
    match state.location_service.update(id, request).await? {
        Some(location) => ok(location),
        None => Err(AppError(SunlogError::not_found("Location", id))),
    }
}

/// Delete a location.
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    tag = "locations",
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "No location with this id")
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete location request: {}", id);
    let id = LocationId::new(id);
    if state.location_service.delete(id).await? {
        Ok(no_content())
    } else {
        Err(AppError(SunlogError::not_found("Location", id)))
    }
}

/// Create or update a batch of locations.
#[utoipa::path(
    post,
    path = "/api/locations/bulk",
    tag = "locations",
    request_body = BulkLocationRequest,
    responses(
        (status = 200, description = "The persisted locations", body = Vec<Location>),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn bulk_create_or_update(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkLocationRequest>,
) -> ApiResult<Vec<Location>> {
    debug!(
        "Bulk create/update request for {} locations",
        request.locations.len()
    );
    let saved = state.location_service.bulk_create_or_update(request).await?;
    ok(saved)
}
