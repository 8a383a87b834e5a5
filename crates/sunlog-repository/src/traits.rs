//! Repository trait definitions.

use async_trait::async_trait;
use sunlog_core::{Interface, Location, LocationId, SunlogResult, SunriseSunset, SunriseSunsetId};

/// Location repository trait.
#[async_trait]
pub trait LocationRepository: Interface + Send + Sync {
    /// Finds all locations, association sets loaded one level deep.
    async fn find_all(&self) -> SunlogResult<Vec<Location>>;

    /// Finds a location by ID.
    async fn find_by_id(&self, id: LocationId) -> SunlogResult<Option<Location>>;

    /// Finds the locations matching the given ids.
    /// Ids with no matching row are omitted from the result.
    async fn find_all_by_id(&self, ids: &[LocationId]) -> SunlogResult<Vec<Location>>;

    /// Finds locations with at least one associated sunrise/sunset record
    /// whose `date` equals the argument.
    async fn find_by_sunrise_sunset_date(&self, date: &str) -> SunlogResult<Vec<Location>>;

    /// Saves a location: insert when the id is unsaved, update otherwise.
    /// Returns the persisted entity carrying its assigned id.
    ///
    /// The location side is the inverse side of the join; its association
    /// set is NOT written to the join table here.
    async fn save(&self, location: &Location) -> SunlogResult<Location>;

    /// Saves a batch of locations in one transaction.
    async fn save_all(&self, locations: &[Location]) -> SunlogResult<Vec<Location>>;

    /// Deletes a location by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: LocationId) -> SunlogResult<bool>;
}

/// Sunrise/sunset record repository trait.
#[async_trait]
pub trait SunriseSunsetRepository: Interface + Send + Sync {
    /// Finds all records, association sets loaded one level deep.
    async fn find_all(&self) -> SunlogResult<Vec<SunriseSunset>>;

    /// Finds a record by ID.
    async fn find_by_id(&self, id: SunriseSunsetId) -> SunlogResult<Option<SunriseSunset>>;

    /// Finds the records matching the given ids.
    /// Ids with no matching row are omitted from the result.
    async fn find_all_by_id(&self, ids: &[SunriseSunsetId]) -> SunlogResult<Vec<SunriseSunset>>;

    /// Finds records whose `date` equals the argument.
    async fn find_by_date(&self, date: &str) -> SunlogResult<Vec<SunriseSunset>>;

    /// Saves a record: insert when the id is unsaved, update otherwise.
    /// The record side owns the join; its join rows are rewritten from the
    /// entity's `locations` set on every save.
    async fn save(&self, record: &SunriseSunset) -> SunlogResult<SunriseSunset>;

    /// Saves a batch of records in one transaction.
    async fn save_all(&self, records: &[SunriseSunset]) -> SunlogResult<Vec<SunriseSunset>>;

    /// Deletes a record by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: SunriseSunsetId) -> SunlogResult<bool>;
}
