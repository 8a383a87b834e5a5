//! Location entity.

use super::sunrise_sunset::SunriseSunset;
use crate::id::{LocationId, SunriseSunsetId};
use crate::validation::rules::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named geographic location that sunrise/sunset records can reference.
///
/// `sunrise_sunsets` is the inverse side of the many-to-many relation; the
/// join table is governed by [`SunriseSunset::locations`]. The set here is
/// loaded one level deep (nested records carry empty location sets) and is
/// visible on returned entities, but mutating it has no persisted effect.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Location {
    /// Store-assigned identity; `LocationId::UNSAVED` until persisted.
    #[serde(default)]
    pub id: LocationId,

    #[validate(custom(function = not_blank, message = "Name is mandatory"))]
    pub name: String,

    #[validate(custom(function = not_blank, message = "Country is mandatory"))]
    pub country: String,

    /// Associated sunrise/sunset records (back-reference).
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(no_recursion))]
    pub sunrise_sunsets: Vec<SunriseSunset>,
}

impl Location {
    /// Creates a new, unsaved location with no associations.
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: LocationId::UNSAVED,
            name: name.into(),
            country: country.into(),
            sunrise_sunsets: Vec::new(),
        }
    }

    /// Appends records to the association set, keeping what is already there.
    pub fn attach_sunrise_sunsets(&mut self, records: Vec<SunriseSunset>) {
        self.sunrise_sunsets.extend(records);
    }

    /// Replaces the association set wholesale.
    pub fn replace_sunrise_sunsets(&mut self, records: Vec<SunriseSunset>) {
        self.sunrise_sunsets = records;
    }

    /// Ids of the associated sunrise/sunset records.
    #[must_use]
    pub fn sunrise_sunset_ids(&self) -> Vec<SunriseSunsetId> {
        self.sunrise_sunsets.iter().map(|r| r.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidateExt;

    #[test]
    fn test_new_location_is_unsaved_and_empty() {
        let location = Location::new("Minsk", "Belarus");
        assert!(location.id.is_unsaved());
        assert!(location.sunrise_sunsets.is_empty());
        assert_eq!(location.name, "Minsk");
        assert_eq!(location.country, "Belarus");
    }

    #[test]
    fn test_attach_appends_instead_of_replacing() {
        let mut location = Location::new("Minsk", "Belarus");
        let first = SunriseSunset::new(53.9, 27.56, "2024-06-01", "02:00:00 AM", "08:00:00 PM");
        location.attach_sunrise_sunsets(vec![first]);
        let second = SunriseSunset::new(54.3, 30.24, "2024-06-02", "02:01:00 AM", "08:01:00 PM");
        location.attach_sunrise_sunsets(vec![second]);
        assert_eq!(location.sunrise_sunsets.len(), 2);
    }

    #[test]
    fn test_replace_discards_previous_associations() {
        let mut location = Location::new("Minsk", "Belarus");
        location.attach_sunrise_sunsets(vec![SunriseSunset::new(
            53.9,
            27.56,
            "2024-06-01",
            "02:00:00 AM",
            "08:00:00 PM",
        )]);
        location.replace_sunrise_sunsets(Vec::new());
        assert!(location.sunrise_sunsets.is_empty());
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        let location = Location::new("  ", "Belarus");
        assert!(location.validate_request().is_err());

        let location = Location::new("Minsk", "");
        assert!(location.validate_request().is_err());

        let location = Location::new("Minsk", "Belarus");
        assert!(location.validate_request().is_ok());
    }
}
