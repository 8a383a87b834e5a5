//! Location-related DTOs.

use serde::{Deserialize, Serialize};
use sunlog_core::validation::rules::not_blank;
use sunlog_core::{LocationId, SunriseSunsetId};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLocationRequest {
    #[validate(custom(function = not_blank, message = "Name is mandatory"))]
    pub name: String,

    #[validate(custom(function = not_blank, message = "Country is mandatory"))]
    pub country: String,

    /// Sunrise/sunset records to associate with the new location.
    /// Unresolvable ids are silently dropped.
    #[serde(default)]
    pub sunrise_sunset_ids: Option<Vec<SunriseSunsetId>>,
}

/// Request to update a location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationRequest {
    #[validate(custom(function = not_blank, message = "Name is mandatory"))]
    pub name: String,

    #[validate(custom(function = not_blank, message = "Country is mandatory"))]
    pub country: String,

    /// `None` leaves the association set untouched; an explicit list
    /// (including an empty one) fully replaces it.
    #[serde(default)]
    pub sunrise_sunset_ids: Option<Vec<SunriseSunsetId>>,
}

/// One entry of a bulk create-or-update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationUpsert {
    /// When present and matching a stored entity, that entity is updated
    /// in place; otherwise the entry is inserted as new.
    #[serde(default)]
    pub id: Option<LocationId>,

    #[validate(custom(function = not_blank, message = "Name is mandatory"))]
    pub name: String,

    #[validate(custom(function = not_blank, message = "Country is mandatory"))]
    pub country: String,
}

/// Request to create or update several locations in one batch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkLocationRequest {
    #[validate(nested)]
    pub locations: Vec<LocationUpsert>,

    /// Resolved once and shared by every entry in the batch.
    #[serde(default)]
    pub sunrise_sunset_ids: Option<Vec<SunriseSunsetId>>,
}
