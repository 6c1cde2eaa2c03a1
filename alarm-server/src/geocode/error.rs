//! Geocoder error types.

/// Errors that can occur when resolving a place name.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The provider answered but found nothing
    #[error("no match for {query:?}")]
    NoMatch { query: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("API error {status}")]
    Api { status: u16 },

    /// Response body was not the expected JSON, or held unusable coordinates
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A fixture file could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

impl GeocodeError {
    /// True when the provider was reachable but had no match. Everything
    /// else means the provider could not be used.
    pub fn is_no_match(&self) -> bool {
        matches!(self, GeocodeError::NoMatch { .. })
    }
}
