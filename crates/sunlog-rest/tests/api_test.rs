//! HTTP surface tests over stubbed services.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use sunlog_config::{LookupConfig, ServerConfig};
use sunlog_core::{
    Location, LocationId, SunlogError, SunlogResult, SunriseSunset, SunriseSunsetId,
};
use sunlog_rest::{create_router, AppState};
use sunlog_service::{
    BulkLocationRequest, CreateLocationRequest, CreateSunriseSunsetRequest, FetchOutcome,
    FetchRequest, LocationService, LookupResponse, RequestCounter, SunriseSunsetService,
    UpdateLocationRequest, UpdateSunriseSunsetRequest,
};
use tower::ServiceExt;

/// Minimal in-memory stand-in for the location service.
struct StubLocationService {
    locations: Mutex<Vec<Location>>,
    counter: Arc<RequestCounter>,
}

impl StubLocationService {
    fn new(counter: Arc<RequestCounter>) -> Self {
        Self {
            locations: Mutex::new(Vec::new()),
            counter,
        }
    }

    fn next_id(&self) -> i64 {
        self.locations
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.id.into_inner())
            .max()
            .unwrap_or(0)
            + 1
    }
}

#[async_trait]
impl LocationService for StubLocationService {
    async fn get_all(&self) -> SunlogResult<Arc<Vec<Location>>> {
        self.counter.increment();
        Ok(Arc::new(self.locations.lock().unwrap().clone()))
    }

    async fn get_by_id(&self, id: LocationId) -> SunlogResult<Option<Location>> {
        self.counter.increment();
        Ok(self
            .locations
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn get_by_date(&self, date: &str) -> SunlogResult<Arc<Vec<Location>>> {
        self.counter.increment();
        Ok(Arc::new(
            self.locations
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.sunrise_sunsets.iter().any(|r| r.date == date))
                .cloned()
                .collect(),
        ))
    }

    async fn create(&self, request: CreateLocationRequest) -> SunlogResult<Location> {
        self.counter.increment();
        let mut location = Location::new(request.name, request.country);
        location.id = LocationId::new(self.next_id());
        self.locations.lock().unwrap().push(location.clone());
        Ok(location)
    }

    async fn update(
        &self,
        id: LocationId,
        request: UpdateLocationRequest,
    ) -> SunlogResult<Option<Location>> {
        self.counter.increment();
        let mut locations = self.locations.lock().unwrap();
        match locations.iter_mut().find(|l| l.id == id) {
            Some(location) => {
                location.name = request.name;
                location.country = request.country;
                Ok(Some(location.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: LocationId) -> SunlogResult<bool> {
        self.counter.increment();
        let mut locations = self.locations.lock().unwrap();
        let before = locations.len();
        locations.retain(|l| l.id != id);
        Ok(locations.len() < before)
    }

    async fn bulk_create_or_update(
        &self,
        request: BulkLocationRequest,
    ) -> SunlogResult<Vec<Location>> {
        self.counter.increment();
        let mut saved = Vec::new();
        for entry in request.locations {
            let mut location = Location::new(entry.name, entry.country);
            location.id = entry.id.unwrap_or_else(|| LocationId::new(self.next_id()));
            self.locations.lock().unwrap().push(location.clone());
            saved.push(location);
        }
        Ok(saved)
    }
}

/// Minimal stand-in for the sunrise/sunset service.
struct StubSunriseSunsetService {
    counter: Arc<RequestCounter>,
}

#[async_trait]
impl SunriseSunsetService for StubSunriseSunsetService {
    async fn get_all(&self) -> SunlogResult<Arc<Vec<SunriseSunset>>> {
        self.counter.increment();
        Ok(Arc::new(Vec::new()))
    }

    async fn get_by_id(&self, _id: SunriseSunsetId) -> SunlogResult<Option<SunriseSunset>> {
        self.counter.increment();
        Ok(None)
    }

    async fn get_by_date(&self, _date: &str) -> SunlogResult<Arc<Vec<SunriseSunset>>> {
        self.counter.increment();
        Ok(Arc::new(Vec::new()))
    }

    async fn create(&self, request: CreateSunriseSunsetRequest) -> SunlogResult<SunriseSunset> {
        self.counter.increment();
        let mut record = SunriseSunset::new(
            request.latitude,
            request.longitude,
            request.date,
            request.sunrise,
            request.sunset,
        );
        record.id = SunriseSunsetId::new(1);
        Ok(record)
    }

    async fn update(
        &self,
        _id: SunriseSunsetId,
        _request: UpdateSunriseSunsetRequest,
    ) -> SunlogResult<Option<SunriseSunset>> {
        self.counter.increment();
        Ok(None)
    }

    async fn delete(&self, _id: SunriseSunsetId) -> SunlogResult<bool> {
        self.counter.increment();
        Ok(false)
    }

    async fn fetch_and_persist(&self, request: FetchRequest) -> SunlogResult<FetchOutcome> {
        self.counter.increment();
        if request.latitude > 90.0 {
            return Err(SunlogError::external_service(
                "sunrise-sunset-api",
                "lookup returned status 'INVALID_REQUEST'",
            ));
        }
        let response: LookupResponse = serde_json::from_value(json!({
            "results": { "sunrise": "02:00:00 AM", "sunset": "08:00:00 PM" },
            "status": "OK"
        }))
        .unwrap();
        let mut record = SunriseSunset::new(
            request.latitude,
            request.longitude,
            request.date.unwrap_or_else(|| "today".to_string()),
            "02:00:00 AM",
            "08:00:00 PM",
        );
        record.id = SunriseSunsetId::new(1);
        Ok(FetchOutcome { response, record })
    }
}

fn test_app() -> (axum::Router, Arc<RequestCounter>) {
    let counter = Arc::new(RequestCounter::new());
    let state = AppState::new(
        Arc::new(StubLocationService::new(counter.clone())),
        Arc::new(StubSunriseSunsetService {
            counter: counter.clone(),
        }),
        counter.clone(),
        LookupConfig::default(),
    );
    (create_router(state, &ServerConfig::default()), counter)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_locations_returns_wrapped_payload() {
    let (app, _) = test_app();

    let response = app
        .oneshot(Request::get("/api/locations").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_absent_location_is_404() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::get("/api/locations/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_then_get_location() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/locations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Minsk", "country": "Belarus" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::get(format!("/api/locations/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["data"]["name"], "Minsk");
}

#[tokio::test]
async fn test_blank_name_is_rejected_with_422() {
    let (app, counter) = test_app();

    let response = app
        .oneshot(
            Request::post("/api/locations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "  ", "country": "Belarus" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    // Rejected before the service layer: no invocation was counted.
    assert_eq!(counter.count(), 0);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_by_date_requires_date_parameter() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::get("/api/locations/by-date")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_reports_204_then_404() {
    let (app, _) = test_app();

    app.clone()
        .oneshot(
            Request::post("/api/locations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Minsk", "country": "Belarus" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::delete("/api/locations/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::delete("/api/locations/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_counter_endpoint_returns_bare_integer() {
    let (app, _) = test_app();

    // Two service invocations.
    for _ in 0..2 {
        app.clone()
            .oneshot(Request::get("/api/locations").body(Body::empty()).unwrap())
            .await
            .unwrap();
    }

    let response = app
        .oneshot(Request::get("/api/counter").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!(2));
}

#[tokio::test]
async fn test_fetch_failure_maps_to_502() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::get("/api/sunrise-sunset/fetch?latitude=95.0&longitude=27.56")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_fetch_success_returns_raw_response_and_record() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::get("/api/sunrise-sunset/fetch?latitude=53.9&longitude=27.56&date=2024-06-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["response"]["status"], "OK");
    assert_eq!(json["data"]["record"]["sunrise"], "02:00:00 AM");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}
