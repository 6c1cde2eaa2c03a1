//! Nominatim API response DTOs.

use serde::Deserialize;

use crate::domain::{Coordinate, GeocodeResult};

use super::error::GeocodeError;

/// One match from the Nominatim `/search` endpoint.
///
/// Nominatim sends many more fields; only the ones we use are mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    /// Latitude as a decimal string, e.g. "13.0836939".
    pub lat: String,

    /// Longitude as a decimal string.
    pub lon: String,

    /// Full human-readable name, e.g. "Chennai, Tamil Nadu, India".
    pub display_name: Option<String>,
}

impl NominatimPlace {
    /// Convert to a domain result, falling back to `query` when the
    /// provider omits the display name.
    pub fn into_result(self, query: &str) -> Result<GeocodeResult, GeocodeError> {
        let lat = parse_degrees(&self.lat, "lat")?;
        let lon = parse_degrees(&self.lon, "lon")?;
        let coordinate = Coordinate::new(lat, lon).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        let display_name = self
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| query.to_string());

        Ok(GeocodeResult::new(coordinate, display_name))
    }
}

fn parse_degrees(raw: &str, field: &str) -> Result<f64, GeocodeError> {
    raw.trim().parse().map_err(|_| GeocodeError::Json {
        message: format!("{field} is not a number: {raw:?}"),
    })
}
