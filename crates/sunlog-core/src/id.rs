//! Typed ID wrappers for domain entities.
//!
//! Identities are assigned by the store (`AUTO_INCREMENT`), so an entity
//! that has not been persisted yet carries the `UNSAVED` sentinel (zero).
//! The store never assigns zero, which is what makes the bulk
//! create-or-update upsert heuristic work: an input without an id always
//! misses the store lookup and is treated as new.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;

/// A strongly-typed wrapper for location IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct LocationId(pub i64);

impl LocationId {
    /// Sentinel for an entity the store has not assigned an id to yet.
    pub const UNSAVED: Self = Self(0);

    /// Creates a location ID from a raw store value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns true if this id has not been assigned by the store.
    #[must_use]
    pub const fn is_unsaved(self) -> bool {
        self.0 == 0
    }

    /// Parses a location ID from a string.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.parse()?))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::UNSAVED
    }
}

impl Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LocationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<LocationId> for i64 {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

/// A strongly-typed wrapper for sunrise/sunset record IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct SunriseSunsetId(pub i64);

impl SunriseSunsetId {
    /// Sentinel for an entity the store has not assigned an id to yet.
    pub const UNSAVED: Self = Self(0);

    /// Creates a sunrise/sunset record ID from a raw store value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns true if this id has not been assigned by the store.
    #[must_use]
    pub const fn is_unsaved(self) -> bool {
        self.0 == 0
    }

    /// Parses a sunrise/sunset record ID from a string.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.parse()?))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Default for SunriseSunsetId {
    fn default() -> Self {
        Self::UNSAVED
    }
}

impl Display for SunriseSunsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SunriseSunsetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<SunriseSunsetId> for i64 {
    fn from(id: SunriseSunsetId) -> Self {
        id.0
    }
}
