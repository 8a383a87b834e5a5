//! Application state for Axum handlers.

use std::sync::Arc;
use sunlog_config::LookupConfig;
use sunlog_service::{LocationService, RequestCounter, SunriseSunsetService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub location_service: Arc<dyn LocationService>,
    pub sunrise_sunset_service: Arc<dyn SunriseSunsetService>,
    pub request_counter: Arc<RequestCounter>,
    pub lookup: LookupConfig,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(
        location_service: Arc<dyn LocationService>,
        sunrise_sunset_service: Arc<dyn SunriseSunsetService>,
        request_counter: Arc<RequestCounter>,
        lookup: LookupConfig,
    ) -> Self {
        Self {
            location_service,
            sunrise_sunset_service,
            request_counter,
            lookup,
        }
    }
}
