//! Location service trait.

use crate::dto::{BulkLocationRequest, CreateLocationRequest, UpdateLocationRequest};
use async_trait::async_trait;
use std::sync::Arc;
use sunlog_core::{Interface, Location, LocationId, SunlogResult};

/// Cache-aside CRUD over locations.
///
/// Reads consult the location cache first and fall through to the store on
/// a miss; every write wholesale-clears the cache. Every operation
/// increments the request counter exactly once, at entry.
#[async_trait]
pub trait LocationService: Interface + Send + Sync {
    /// All locations. Returns the cached snapshot verbatim on a hit.
    async fn get_all(&self) -> SunlogResult<Arc<Vec<Location>>>;

    /// A single location, or `Ok(None)` when absent (not an error).
    async fn get_by_id(&self, id: LocationId) -> SunlogResult<Option<Location>>;

    /// Locations with at least one associated sunrise/sunset record on the
    /// given date.
    async fn get_by_date(&self, date: &str) -> SunlogResult<Arc<Vec<Location>>>;

    /// Creates a location, attaching the resolved record ids.
    async fn create(&self, request: CreateLocationRequest) -> SunlogResult<Location>;

    /// Updates a location loaded fresh from the store; `Ok(None)` when absent.
    async fn update(
        &self,
        id: LocationId,
        request: UpdateLocationRequest,
    ) -> SunlogResult<Option<Location>>;

    /// Deletes a location. `Ok(false)` when absent.
    async fn delete(&self, id: LocationId) -> SunlogResult<bool>;

    /// Upserts a batch of locations sharing one resolved association set.
    async fn bulk_create_or_update(
        &self,
        request: BulkLocationRequest,
    ) -> SunlogResult<Vec<Location>>;
}
