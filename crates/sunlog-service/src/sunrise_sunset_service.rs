//! Sunrise/sunset service trait.

use crate::dto::{
    CreateSunriseSunsetRequest, FetchOutcome, FetchRequest, UpdateSunriseSunsetRequest,
};
use async_trait::async_trait;
use std::sync::Arc;
use sunlog_core::{Interface, SunlogResult, SunriseSunset, SunriseSunsetId};

/// Cache-aside CRUD over sunrise/sunset records, plus the external
/// fetch-and-persist path.
///
/// Mirrors [`crate::LocationService`]'s cache-aside and invalidation
/// pattern with the record cache. Every operation increments the request
/// counter exactly once, at entry.
#[async_trait]
pub trait SunriseSunsetService: Interface + Send + Sync {
    /// All records. Returns the cached snapshot verbatim on a hit.
    async fn get_all(&self) -> SunlogResult<Arc<Vec<SunriseSunset>>>;

    /// A single record, or `Ok(None)` when absent (not an error).
    async fn get_by_id(&self, id: SunriseSunsetId) -> SunlogResult<Option<SunriseSunset>>;

    /// Records whose `date` equals the argument.
    async fn get_by_date(&self, date: &str) -> SunlogResult<Arc<Vec<SunriseSunset>>>;

    /// Creates a record, attaching the resolved location ids.
    async fn create(&self, request: CreateSunriseSunsetRequest) -> SunlogResult<SunriseSunset>;

    /// Updates a record loaded fresh from the store; `Ok(None)` when absent.
    async fn update(
        &self,
        id: SunriseSunsetId,
        request: UpdateSunriseSunsetRequest,
    ) -> SunlogResult<Option<SunriseSunset>>;

    /// Deletes a record. `Ok(false)` when absent.
    async fn delete(&self, id: SunriseSunsetId) -> SunlogResult<bool>;

    /// Calls the external lookup API and persists the reading.
    ///
    /// Nothing is persisted unless the external call unambiguously
    /// succeeded; retries and timeout policy belong to the caller.
    async fn fetch_and_persist(&self, request: FetchRequest) -> SunlogResult<FetchOutcome>;
}
