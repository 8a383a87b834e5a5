//! Sunrise/sunset-related DTOs.

use crate::lookup::LookupResponse;
use serde::{Deserialize, Serialize};
use sunlog_core::validation::rules::not_blank;
use sunlog_core::{LocationId, SunriseSunset};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new sunrise/sunset record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSunriseSunsetRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within -90..=90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within -180..=180"))]
    pub longitude: f64,

    #[validate(custom(function = not_blank, message = "Date is mandatory"))]
    pub date: String,

    #[validate(custom(function = not_blank, message = "Sunrise time is mandatory"))]
    pub sunrise: String,

    #[validate(custom(function = not_blank, message = "Sunset time is mandatory"))]
    pub sunset: String,

    /// Locations to associate with the new record.
    /// Unresolvable ids are silently dropped.
    #[serde(default)]
    pub location_ids: Option<Vec<LocationId>>,
}

/// Request to update a sunrise/sunset record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSunriseSunsetRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within -90..=90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within -180..=180"))]
    pub longitude: f64,

    #[validate(custom(function = not_blank, message = "Date is mandatory"))]
    pub date: String,

    #[validate(custom(function = not_blank, message = "Sunrise time is mandatory"))]
    pub sunrise: String,

    #[validate(custom(function = not_blank, message = "Sunset time is mandatory"))]
    pub sunset: String,

    /// `None` leaves the association set untouched; an explicit list
    /// (including an empty one) fully replaces it.
    #[serde(default)]
    pub location_ids: Option<Vec<LocationId>>,
}

/// Request to fetch a reading from the external lookup API and persist it.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to `"today"` when absent.
    pub date: Option<String>,
    pub location_ids: Vec<LocationId>,
}

/// Result of a fetch-and-persist call: the raw external response plus the
/// record that was persisted from it.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub response: LookupResponse,
    pub record: SunriseSunset,
}
