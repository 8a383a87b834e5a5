//! Location service implementation.

use crate::cache::{cache_keys, EntityCache};
use crate::counter::RequestCounter;
use crate::dto::{BulkLocationRequest, CreateLocationRequest, UpdateLocationRequest};
use crate::location_service::LocationService;
use crate::resolver::AssociationResolver;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use sunlog_core::{Location, LocationId, SunlogError, SunlogResult, ValidateExt};
use sunlog_repository::LocationRepository;
use tracing::{debug, info};

/// Cache-aside location service.
///
/// The cache and the counter are process-wide objects constructed by the
/// service registry at startup and shared with the sibling service; this
/// component only borrows them.
#[derive(Component)]
#[shaku(interface = LocationService)]
pub struct LocationServiceImpl {
    #[shaku(inject)]
    location_repository: Arc<dyn LocationRepository>,
    #[shaku(inject)]
    resolver: Arc<dyn AssociationResolver>,
    cache: Arc<EntityCache<Location>>,
    counter: Arc<RequestCounter>,
}

impl LocationServiceImpl {
    /// Creates a new location service.
    #[must_use]
    pub fn new(
        location_repository: Arc<dyn LocationRepository>,
        resolver: Arc<dyn AssociationResolver>,
        cache: Arc<EntityCache<Location>>,
        counter: Arc<RequestCounter>,
    ) -> Self {
        Self {
            location_repository,
            resolver,
            cache,
            counter,
        }
    }
}

#[async_trait]
impl LocationService for LocationServiceImpl {
    async fn get_all(&self) -> SunlogResult<Arc<Vec<Location>>> {
        self.counter.increment();

        let key = cache_keys::all_locations();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Returning cached locations for key: {}", key);
            return Ok(cached);
        }

        debug!("Cache miss, querying store for all locations");
        let locations = self.location_repository.find_all().await?;
        Ok(self.cache.put(key, locations))
    }

    async fn get_by_id(&self, id: LocationId) -> SunlogResult<Option<Location>> {
        self.counter.increment();

        let key = cache_keys::location_by_id(id);
        if let Some(cached) = self.cache.get(&key) {
            if cached.len() != 1 {
                return Err(SunlogError::invariant_violation(format!(
                    "key '{}' holds {} entries, expected exactly one",
                    key,
                    cached.len()
                )));
            }
            return Ok(cached.first().cloned());
        }

        debug!("Cache miss, querying store for location ID: {}", id);
        let location = self.location_repository.find_by_id(id).await?;
        if let Some(location) = &location {
            self.cache.put(key, vec![location.clone()]);
        }
        Ok(location)
    }

    async fn get_by_date(&self, date: &str) -> SunlogResult<Arc<Vec<Location>>> {
        self.counter.increment();

        let key = cache_keys::locations_by_date(date);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Returning cached locations for key: {}", key);
            return Ok(cached);
        }

        debug!("Cache miss, querying store for locations by date: {}", date);
        let locations = self
            .location_repository
            .find_by_sunrise_sunset_date(date)
            .await?;
        Ok(self.cache.put(key, locations))
    }

    async fn create(&self, request: CreateLocationRequest) -> SunlogResult<Location> {
        self.counter.increment();
        request.validate_request()?;

        let record_ids = request.sunrise_sunset_ids.unwrap_or_default();
        let records = self.resolver.resolve_sunrise_sunsets(&record_ids).await?;

        let mut location = Location::new(request.name, request.country);
        location.attach_sunrise_sunsets(records);

        let saved = self.location_repository.save(&location).await?;
        self.cache.clear();
        debug!("Cache cleared after creating location");

        info!("Location created: {}", saved.id);
        Ok(saved)
    }

    async fn update(
        &self,
        id: LocationId,
        request: UpdateLocationRequest,
    ) -> SunlogResult<Option<Location>> {
        self.counter.increment();
        request.validate_request()?;

        // Always load from the store, never the cache, so the update acts
        // on current state.
        let Some(mut location) = self.location_repository.find_by_id(id).await? else {
            return Ok(None);
        };

        location.name = request.name;
        location.country = request.country;

        if let Some(record_ids) = request.sunrise_sunset_ids {
            let records = self.resolver.resolve_sunrise_sunsets(&record_ids).await?;
            location.replace_sunrise_sunsets(records);
        }

        let saved = self.location_repository.save(&location).await?;
        self.cache.clear();
        debug!("Cache cleared after updating location ID: {}", id);

        info!("Location updated: {}", id);
        Ok(Some(saved))
    }

    async fn delete(&self, id: LocationId) -> SunlogResult<bool> {
        self.counter.increment();

        if self.location_repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.location_repository.delete(id).await?;
        self.cache.clear();
        debug!("Cache cleared after deleting location ID: {}", id);

        info!("Location deleted: {}", id);
        Ok(deleted)
    }

    async fn bulk_create_or_update(
        &self,
        request: BulkLocationRequest,
    ) -> SunlogResult<Vec<Location>> {
        self.counter.increment();
        request.validate_request()?;

        // Resolved once, shared across every entry in the batch.
        let record_ids = request.sunrise_sunset_ids.unwrap_or_default();
        let shared_records = self.resolver.resolve_sunrise_sunsets(&record_ids).await?;

        let mut processed = Vec::with_capacity(request.locations.len());
        for entry in request.locations {
            // An entry without an id falls back to the unsaved sentinel,
            // which the store never contains, so it is always new.
            let id = entry.id.unwrap_or(LocationId::UNSAVED);
            match self.location_repository.find_by_id(id).await? {
                Some(mut existing) => {
                    existing.name = entry.name;
                    existing.country = entry.country;
                    existing.replace_sunrise_sunsets(shared_records.clone());
                    processed.push(existing);
                }
                None => {
                    let mut location = Location::new(entry.name, entry.country);
                    location.attach_sunrise_sunsets(shared_records.clone());
                    processed.push(location);
                }
            }
        }

        let saved = self.location_repository.save_all(&processed).await?;
        self.cache.clear();
        debug!(
            "Cache cleared after bulk create/update of {} locations",
            saved.len()
        );
        Ok(saved)
    }
}

impl std::fmt::Debug for LocationServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationServiceImpl").finish_non_exhaustive()
    }
}
