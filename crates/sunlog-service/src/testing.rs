//! Shared in-memory test doubles for the service layer.

use crate::lookup::{LookupResponse, SunriseLookupApi, LOOKUP_SERVICE};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use sunlog_core::{
    Location, LocationId, SunlogError, SunlogResult, SunriseSunset, SunriseSunsetId,
};
use sunlog_repository::{LocationRepository, SunriseSunsetRepository};

/// In-memory location repository with call counters.
pub struct InMemoryLocationRepository {
    locations: Mutex<HashMap<i64, Location>>,
    next_id: AtomicI64,
    find_all_calls: AtomicUsize,
    find_all_by_id_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self {
            locations: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            find_all_calls: AtomicUsize::new(0),
            find_all_by_id_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
        }
    }

    /// Saves directly, bypassing counters, for test setup.
    pub async fn seed(&self, location: Location) -> Location {
        let mut saved = location;
        if saved.id.is_unsaved() {
            saved.id = LocationId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.locations
            .lock()
            .unwrap()
            .insert(saved.id.into_inner(), saved.clone());
        saved
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    pub fn find_all_by_id_calls(&self) -> usize {
        self.find_all_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find_all(&self) -> SunlogResult<Vec<Location>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        let mut all: Vec<Location> = self.locations.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|l| l.id.into_inner());
        Ok(all)
    }

    async fn find_by_id(&self, id: LocationId) -> SunlogResult<Option<Location>> {
        Ok(self.locations.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_all_by_id(&self, ids: &[LocationId]) -> SunlogResult<Vec<Location>> {
        self.find_all_by_id_calls.fetch_add(1, Ordering::SeqCst);
        let locations = self.locations.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| locations.get(&id.into_inner()).cloned())
            .collect())
    }

    async fn find_by_sunrise_sunset_date(&self, date: &str) -> SunlogResult<Vec<Location>> {
        let mut matching: Vec<Location> = self
            .locations
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.sunrise_sunsets.iter().any(|r| r.date == date))
            .cloned()
            .collect();
        matching.sort_by_key(|l| l.id.into_inner());
        Ok(matching)
    }

    async fn save(&self, location: &Location) -> SunlogResult<Location> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.seed(location.clone()).await)
    }

    async fn save_all(&self, locations: &[Location]) -> SunlogResult<Vec<Location>> {
        let mut saved = Vec::with_capacity(locations.len());
        for location in locations {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            saved.push(self.seed(location.clone()).await);
        }
        Ok(saved)
    }

    async fn delete(&self, id: LocationId) -> SunlogResult<bool> {
        Ok(self
            .locations
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .is_some())
    }
}

/// In-memory sunrise/sunset repository with call counters.
pub struct InMemorySunriseSunsetRepository {
    records: Mutex<HashMap<i64, SunriseSunset>>,
    next_id: AtomicI64,
    find_all_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl InMemorySunriseSunsetRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            find_all_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
        }
    }

    /// Saves directly, bypassing counters, for test setup.
    pub async fn seed(&self, record: SunriseSunset) -> SunriseSunset {
        let mut saved = record;
        if saved.id.is_unsaved() {
            saved.id = SunriseSunsetId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.records
            .lock()
            .unwrap()
            .insert(saved.id.into_inner(), saved.clone());
        saved
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SunriseSunsetRepository for InMemorySunriseSunsetRepository {
    async fn find_all(&self) -> SunlogResult<Vec<SunriseSunset>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        let mut all: Vec<SunriseSunset> = self.records.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|r| r.id.into_inner());
        Ok(all)
    }

    async fn find_by_id(&self, id: SunriseSunsetId) -> SunlogResult<Option<SunriseSunset>> {
        Ok(self.records.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_all_by_id(&self, ids: &[SunriseSunsetId]) -> SunlogResult<Vec<SunriseSunset>> {
        let records = self.records.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| records.get(&id.into_inner()).cloned())
            .collect())
    }

    async fn find_by_date(&self, date: &str) -> SunlogResult<Vec<SunriseSunset>> {
        let mut matching: Vec<SunriseSunset> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.id.into_inner());
        Ok(matching)
    }

    async fn save(&self, record: &SunriseSunset) -> SunlogResult<SunriseSunset> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.seed(record.clone()).await)
    }

    async fn save_all(&self, records: &[SunriseSunset]) -> SunlogResult<Vec<SunriseSunset>> {
        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            saved.push(self.seed(record.clone()).await);
        }
        Ok(saved)
    }

    async fn delete(&self, id: SunriseSunsetId) -> SunlogResult<bool> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .is_some())
    }
}

/// Scripted lookup API double.
pub struct MockLookupApi {
    response: Mutex<Option<LookupResponse>>,
    calls: AtomicUsize,
    last_date: Mutex<Option<String>>,
}

impl MockLookupApi {
    /// Responds with `status: "OK"` and the given times.
    pub fn ok(sunrise: &str, sunset: &str) -> Self {
        let response: LookupResponse = serde_json::from_value(json!({
            "results": { "sunrise": sunrise, "sunset": sunset },
            "status": "OK"
        }))
        .unwrap();
        Self {
            response: Mutex::new(Some(response)),
            calls: AtomicUsize::new(0),
            last_date: Mutex::new(None),
        }
    }

    /// Responds with a non-success status and empty results.
    pub fn with_status(status: &str) -> Self {
        let response: LookupResponse =
            serde_json::from_value(json!({ "results": "", "status": status })).unwrap();
        Self {
            response: Mutex::new(Some(response)),
            calls: AtomicUsize::new(0),
            last_date: Mutex::new(None),
        }
    }

    /// Fails every call at the transport level.
    pub fn failing() -> Self {
        Self {
            response: Mutex::new(None),
            calls: AtomicUsize::new(0),
            last_date: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_date(&self) -> Option<String> {
        self.last_date.lock().unwrap().clone()
    }
}

#[async_trait]
impl SunriseLookupApi for MockLookupApi {
    async fn fetch(
        &self,
        _latitude: f64,
        _longitude: f64,
        date: &str,
    ) -> SunlogResult<LookupResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_date.lock().unwrap() = Some(date.to_string());
        match self.response.lock().unwrap().clone() {
            Some(response) => Ok(response),
            None => Err(SunlogError::external_service(
                LOOKUP_SERVICE,
                "connection refused",
            )),
        }
    }
}
