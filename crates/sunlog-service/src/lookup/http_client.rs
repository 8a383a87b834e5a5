//! HTTP client for the sunrise/sunset lookup API.

use super::{LookupResponse, SunriseLookupApi, LOOKUP_SERVICE};
use async_trait::async_trait;
use reqwest::Client;
use shaku::Component;
use std::time::Duration;
use sunlog_config::LookupConfig;
use sunlog_core::{SunlogError, SunlogResult};
use tracing::debug;

/// HTTP implementation of [`SunriseLookupApi`] against
/// `GET {base_url}/json?lat=&lng=&date=`.
#[derive(Component)]
#[shaku(interface = SunriseLookupApi)]
pub struct SunriseLookupClient {
    client: Client,
    base_url: String,
}

impl SunriseLookupClient {
    /// Creates a client from configuration, applying the request timeout.
    pub fn new(config: &LookupConfig) -> SunlogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SunlogError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Creates a client with a pre-built `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SunriseLookupApi for SunriseLookupClient {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> SunlogResult<LookupResponse> {
        let url = format!("{}/json", self.base_url);
        debug!(
            "Fetching sunrise/sunset from {} (lat: {}, lng: {}, date: {})",
            url, latitude, longitude, date
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("date", date.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                SunlogError::external_service(LOOKUP_SERVICE, format!("request failed: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                SunlogError::external_service(LOOKUP_SERVICE, format!("bad status: {}", e))
            })?;

        response.json::<LookupResponse>().await.map_err(|e| {
            SunlogError::external_service(LOOKUP_SERVICE, format!("malformed response: {}", e))
        })
    }
}

impl std::fmt::Debug for SunriseLookupClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SunriseLookupClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
