//! Cache key generators for consistent key naming.
//!
//! Keys are opaque strings owned by the services; nothing else should
//! construct them by hand.

use sunlog_core::{LocationId, SunriseSunsetId};

/// Key for the full location listing.
#[must_use]
pub fn all_locations() -> String {
    "all_locations".to_string()
}

/// Key for a single location by id (stored as a one-element list).
#[must_use]
pub fn location_by_id(id: LocationId) -> String {
    format!("location_{}", id)
}

/// Key for locations filtered by associated sunrise/sunset date.
#[must_use]
pub fn locations_by_date(date: &str) -> String {
    format!("locations_date_{}", date)
}

/// Key for the full sunrise/sunset listing.
#[must_use]
pub fn all_sunrise_sunset() -> String {
    "all_sunrise_sunset".to_string()
}

/// Key for a single sunrise/sunset record by id (one-element list).
#[must_use]
pub fn sunrise_sunset_by_id(id: SunriseSunsetId) -> String {
    format!("sunrise_sunset_{}", id)
}

/// Key for sunrise/sunset records filtered by date.
#[must_use]
pub fn sunrise_sunset_by_date(date: &str) -> String {
    format!("sunrise_sunset_date_{}", date)
}
