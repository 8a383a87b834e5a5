//! Sunrise/sunset record entity.

use super::location::Location;
use crate::id::{LocationId, SunriseSunsetId};
use crate::validation::rules::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sunrise/sunset observation for a pair of coordinates on a date.
///
/// `date`, `sunrise` and `sunset` are free-form strings; the core performs
/// no calendar or clock parsing on them. This side owns the many-to-many
/// join with [`Location`]: the `locations` set is what gets persisted to
/// the join table on save.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SunriseSunset {
    /// Store-assigned identity; `SunriseSunsetId::UNSAVED` until persisted.
    #[serde(default)]
    pub id: SunriseSunsetId,

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

    /// Associated locations (owning side of the join).
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl SunriseSunset {
    /// Creates a new, unsaved record with no associations.
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        date: impl Into<String>,
        sunrise: impl Into<String>,
        sunset: impl Into<String>,
    ) -> Self {
        Self {
            id: SunriseSunsetId::UNSAVED,
            latitude,
            longitude,
            date: date.into(),
            sunrise: sunrise.into(),
            sunset: sunset.into(),
            locations: Vec::new(),
        }
    }

    /// Appends locations to the association set, keeping what is already there.
    pub fn attach_locations(&mut self, locations: Vec<Location>) {
        self.locations.extend(locations);
    }

    /// Replaces the association set wholesale.
    pub fn replace_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
    }

    /// Ids of the associated locations.
    #[must_use]
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.iter().map(|l| l.id).collect()
    }
}
