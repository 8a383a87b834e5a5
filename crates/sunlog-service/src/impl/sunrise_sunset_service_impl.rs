//! Sunrise/sunset service implementation.

use crate::cache::{cache_keys, EntityCache};
use crate::counter::RequestCounter;
use crate::dto::{
    CreateSunriseSunsetRequest, FetchOutcome, FetchRequest, UpdateSunriseSunsetRequest,
};
use crate::lookup::{SunriseLookupApi, LOOKUP_SERVICE};
use crate::resolver::AssociationResolver;
use crate::sunrise_sunset_service::SunriseSunsetService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use sunlog_core::validation::rules;
use sunlog_core::{
    SunlogError, SunlogResult, SunriseSunset, SunriseSunsetId, ValidateExt,
};
use sunlog_repository::SunriseSunsetRepository;
use tracing::{debug, info};

/// Fallback date sent to the lookup API when a fetch request has none.
const TODAY: &str = "today";

/// Cache-aside sunrise/sunset service.
///
/// Mirrors the location service's cache-aside pattern with the record
/// cache, and adds the external fetch-and-persist path.
#[derive(Component)]
#[shaku(interface = SunriseSunsetService)]
pub struct SunriseSunsetServiceImpl {
    #[shaku(inject)]
    sunrise_sunset_repository: Arc<dyn SunriseSunsetRepository>,
    #[shaku(inject)]
    resolver: Arc<dyn AssociationResolver>,
    #[shaku(inject)]
    lookup_api: Arc<dyn SunriseLookupApi>,
    cache: Arc<EntityCache<SunriseSunset>>,
    counter: Arc<RequestCounter>,
}

impl SunriseSunsetServiceImpl {
    /// Creates a new sunrise/sunset service.
    #[must_use]
    pub fn new(
        sunrise_sunset_repository: Arc<dyn SunriseSunsetRepository>,
        resolver: Arc<dyn AssociationResolver>,
        lookup_api: Arc<dyn SunriseLookupApi>,
        cache: Arc<EntityCache<SunriseSunset>>,
        counter: Arc<RequestCounter>,
    ) -> Self {
        Self {
            sunrise_sunset_repository,
            resolver,
            lookup_api,
            cache,
            counter,
        }
    }
}

#[async_trait]
impl SunriseSunsetService for SunriseSunsetServiceImpl {
    async fn get_all(&self) -> SunlogResult<Arc<Vec<SunriseSunset>>> {
        self.counter.increment();

        let key = cache_keys::all_sunrise_sunset();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Returning cached sunrise/sunset records for key: {}", key);
            return Ok(cached);
        }

        debug!("Cache miss, querying store for all sunrise/sunset records");
        let records = self.sunrise_sunset_repository.find_all().await?;
        Ok(self.cache.put(key, records))
    }

    async fn get_by_id(&self, id: SunriseSunsetId) -> SunlogResult<Option<SunriseSunset>> {
        self.counter.increment();

        let key = cache_keys::sunrise_sunset_by_id(id);
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

        debug!("Cache miss, querying store for sunrise/sunset ID: {}", id);
        let record = self.sunrise_sunset_repository.find_by_id(id).await?;
        if let Some(record) = &record {
            self.cache.put(key, vec![record.clone()]);
        }
        Ok(record)
    }

    async fn get_by_date(&self, date: &str) -> SunlogResult<Arc<Vec<SunriseSunset>>> {
        self.counter.increment();

        let key = cache_keys::sunrise_sunset_by_date(date);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Returning cached sunrise/sunset records for date: {}", date);
            return Ok(cached);
        }

        debug!("Cache miss, querying store for date: {}", date);
        let records = self.sunrise_sunset_repository.find_by_date(date).await?;
        Ok(self.cache.put(key, records))
    }

    async fn create(&self, request: CreateSunriseSunsetRequest) -> SunlogResult<SunriseSunset> {
        self.counter.increment();
        request.validate_request()?;

        let location_ids = request.location_ids.unwrap_or_default();
        let locations = self.resolver.resolve_locations(&location_ids).await?;

        let mut record = SunriseSunset::new(
            request.latitude,
            request.longitude,
            request.date,
            request.sunrise,
            request.sunset,
        );
        record.attach_locations(locations);

        let saved = self.sunrise_sunset_repository.save(&record).await?;
        self.cache.clear();
        debug!("Cache cleared after creating sunrise/sunset record");

        info!("Sunrise/sunset record created: {}", saved.id);
        Ok(saved)
    }

    async fn update(
        &self,
        id: SunriseSunsetId,
        request: UpdateSunriseSunsetRequest,
    ) -> SunlogResult<Option<SunriseSunset>> {
        self.counter.increment();
        request.validate_request()?;

        // Always load from the store, never the cache, so the update acts
        // on current state.
        let Some(mut record) = self.sunrise_sunset_repository.find_by_id(id).await? else {
            return Ok(None);
        };

        record.latitude = request.latitude;
        record.longitude = request.longitude;
        record.date = request.date;
        record.sunrise = request.sunrise;
        record.sunset = request.sunset;

        if let Some(location_ids) = request.location_ids {
            let locations = self.resolver.resolve_locations(&location_ids).await?;
            record.replace_locations(locations);
        }

        let saved = self.sunrise_sunset_repository.save(&record).await?;
        self.cache.clear();
        debug!("Cache cleared after updating sunrise/sunset record ID: {}", id);

        info!("Sunrise/sunset record updated: {}", id);
        Ok(Some(saved))
    }

    async fn delete(&self, id: SunriseSunsetId) -> SunlogResult<bool> {
        self.counter.increment();

        if self.sunrise_sunset_repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.sunrise_sunset_repository.delete(id).await?;
        self.cache.clear();
        debug!("Cache cleared after deleting sunrise/sunset record ID: {}", id);

        info!("Sunrise/sunset record deleted: {}", id);
        Ok(deleted)
    }

    async fn fetch_and_persist(&self, request: FetchRequest) -> SunlogResult<FetchOutcome> {
        self.counter.increment();

        rules::valid_latitude(request.latitude)
            .map_err(|_| SunlogError::validation("Latitude must be within -90..=90"))?;
        rules::valid_longitude(request.longitude)
            .map_err(|_| SunlogError::validation("Longitude must be within -180..=180"))?;

        let date = request.date.unwrap_or_else(|| TODAY.to_string());

        let response = self
            .lookup_api
            .fetch(request.latitude, request.longitude, &date)
            .await?;

        if !response.is_ok() {
            return Err(SunlogError::external_service(
                LOOKUP_SERVICE,
                format!("lookup returned status '{}'", response.status),
            ));
        }
        let Some(results) = response.results() else {
            return Err(SunlogError::external_service(
                LOOKUP_SERVICE,
                "lookup response did not include sunrise/sunset results",
            ));
        };

        let mut record = SunriseSunset::new(
            request.latitude,
            request.longitude,
            date,
            results.sunrise,
            results.sunset,
        );
        let locations = self.resolver.resolve_locations(&request.location_ids).await?;
        record.attach_locations(locations);

        let saved = self.sunrise_sunset_repository.save(&record).await?;
        self.cache.clear();
        debug!("Cache cleared after fetching sunrise/sunset data");

        info!("Fetched and persisted sunrise/sunset record: {}", saved.id);
        Ok(FetchOutcome {
            response,
            record: saved,
        })
    }
}

impl std::fmt::Debug for SunriseSunsetServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SunriseSunsetServiceImpl").finish_non_exhaustive()
    }
}
