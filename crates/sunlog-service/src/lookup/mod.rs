//! External sunrise/sunset lookup API.

mod http_client;

pub use http_client::{SunriseLookupClient, SunriseLookupClientParameters};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sunlog_core::{Interface, SunlogResult};

/// Name used in `ExternalService` errors for the lookup API.
pub const LOOKUP_SERVICE: &str = "sunrise-sunset-api";

/// Client for the external sunrise/sunset lookup API.
///
/// Implementations fail with `ExternalService` on transport or protocol
/// errors; a response that arrives but carries a non-success status is
/// returned as-is for the caller to inspect.
#[async_trait]
pub trait SunriseLookupApi: Interface + Send + Sync {
    /// Fetches sunrise/sunset data for the given coordinates and date.
    async fn fetch(&self, latitude: f64, longitude: f64, date: &str)
        -> SunlogResult<LookupResponse>;
}

/// Raw response from the lookup API.
///
/// `results` is kept as a raw JSON value because the API replaces the
/// results object with an empty string on error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    /// `"OK"` on success; anything else is a failure.
    pub status: String,
    #[serde(default)]
    pub results: serde_json::Value,
}

impl LookupResponse {
    /// Returns true if the API reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// Parses the results object, if the response carries one.
    #[must_use]
    pub fn results(&self) -> Option<LookupResults> {
        serde_json::from_value(self.results.clone()).ok()
    }
}

/// The fields of a successful lookup this service consumes.
/// Unknown fields (solar noon, day length, twilight times) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResults {
    pub sunrise: String,
    pub sunset: String,
}
