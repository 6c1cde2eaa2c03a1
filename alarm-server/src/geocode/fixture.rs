//! Static geocoder for testing without network access.
//!
//! Answers from a fixed table of places, optionally loaded from a JSON
//! file, and behaves like the real client for anything it doesn't know.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Coordinate, GeocodeResult, InvalidCoordinate};

use super::Geocoder;
use super::error::GeocodeError;

/// One entry in a fixture file.
#[derive(Debug, Deserialize)]
struct FixturePlace {
    name: String,
    lat: f64,
    lon: f64,
    display_name: Option<String>,
}

/// Geocoder that serves places from memory.
///
/// Lookups ignore case and surrounding whitespace. Unknown names give
/// `GeocodeError::NoMatch`, as an empty provider response would.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, GeocodeResult>,
}

impl StaticGeocoder {
    /// Create an empty geocoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place, builder style.
    pub fn with_place(
        mut self,
        name: &str,
        latitude: f64,
        longitude: f64,
        display_name: &str,
    ) -> Result<Self, InvalidCoordinate> {
        let coordinate = Coordinate::new(latitude, longitude)?;
        self.insert(name, GeocodeResult::new(coordinate, display_name));
        Ok(self)
    }

    /// Add or replace a place.
    pub fn insert(&mut self, name: &str, result: GeocodeResult) {
        self.places.insert(normalize(name), result);
    }

    /// Load places from a JSON file.
    ///
    /// Expects an array of `{"name", "lat", "lon", "display_name"?}`
    /// objects, with `display_name` defaulting to `name`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeocodeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GeocodeError::Fixture {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let entries: Vec<FixturePlace> =
            serde_json::from_str(&json).map_err(|e| GeocodeError::Fixture {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;

        let mut geocoder = Self::new();
        for entry in entries {
            let coordinate =
                Coordinate::new(entry.lat, entry.lon).map_err(|e| GeocodeError::Fixture {
                    message: format!("{}: {}", entry.name, e),
                })?;
            let display_name = entry.display_name.unwrap_or_else(|| entry.name.clone());
            geocoder.insert(&entry.name, GeocodeResult::new(coordinate, display_name));
        }

        Ok(geocoder)
    }

    /// Number of known places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Check if no places are known.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Geocoder for StaticGeocoder {
    async fn geocode(&self, place_name: &str) -> Result<GeocodeResult, GeocodeError> {
        self.places
            .get(&normalize(place_name))
            .cloned()
            .ok_or_else(|| GeocodeError::NoMatch {
                query: place_name.to_string(),
            })
    }
}
