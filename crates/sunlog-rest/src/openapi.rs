//! OpenAPI documentation configuration.

use sunlog_core::{ErrorResponse, FieldError, Location, LocationId, SunriseSunset, SunriseSunsetId};
use sunlog_service::{
    BulkLocationRequest, CreateLocationRequest, CreateSunriseSunsetRequest, LocationUpsert,
    UpdateLocationRequest, UpdateSunriseSunsetRequest,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Sunlog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sunlog API",
        version = "1.0.0",
        description = "Sunrise/sunset observation records with location associations"
    ),
    paths(
        // Location endpoints
        crate::controllers::location_controller::list_locations,
        crate::controllers::location_controller::get_location,
        crate::controllers::location_controller::get_locations_by_date,
        crate::controllers::location_controller::create_location,
        crate::controllers::location_controller::update_location,
        crate::controllers::location_controller::delete_location,
        crate::controllers::location_controller::bulk_create_or_update,
        // Sunrise/sunset endpoints
        crate::controllers::sunrise_sunset_controller::list_records,
        crate::controllers::sunrise_sunset_controller::get_record,
        crate::controllers::sunrise_sunset_controller::get_records_by_date,
        crate::controllers::sunrise_sunset_controller::fetch_record,
        crate::controllers::sunrise_sunset_controller::create_record,
        crate::controllers::sunrise_sunset_controller::update_record,
        crate::controllers::sunrise_sunset_controller::delete_record,
        // Counter endpoint
        crate::controllers::counter_controller::get_request_count,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            LocationId,
            SunriseSunsetId,
            Location,
            SunriseSunset,
            ErrorResponse,
            FieldError,
            CreateLocationRequest,
            UpdateLocationRequest,
            LocationUpsert,
            BulkLocationRequest,
            CreateSunriseSunsetRequest,
            UpdateSunriseSunsetRequest,
        )
    ),
    tags(
        (name = "locations", description = "Location management endpoints"),
        (name = "sunrise-sunset", description = "Sunrise/sunset record endpoints"),
        (name = "counter", description = "Request counter endpoint"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
