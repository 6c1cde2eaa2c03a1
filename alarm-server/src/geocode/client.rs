//! Nominatim HTTP client.

use std::time::Duration;

use tracing::debug;

use crate::domain::GeocodeResult;

use super::Geocoder;
use super::error::GeocodeError;
use super::types::NominatimPlace;

/// Default Nominatim search endpoint.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Identifies this application to Nominatim.
const DEFAULT_USER_AGENT: &str = "GPSAlarmSystem/1.0";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Full URL of the search endpoint
    pub base_url: String,
    /// Sent as the `User-Agent` header on every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Create a config with the public Nominatim endpoint.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom search URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the identifying user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Search for the single best match for `place_name`.
    pub async fn search(&self, place_name: &str) -> Result<GeocodeResult, GeocodeError> {
        let query = place_name.trim();
        if query.is_empty() {
            return Err(GeocodeError::NoMatch {
                query: place_name.to_string(),
            });
        }

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch {
                query: query.to_string(),
            })?;

        let result = place.into_result(place_name)?;
        debug!(
            query,
            display_name = result.display_name(),
            coordinate = %result.coordinate(),
            "geocoded place"
        );
        Ok(result)
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, place_name: &str) -> Result<GeocodeResult, GeocodeError> {
        self.search(place_name).await
    }
}
