//! Resolved places.

use super::Coordinate;

/// A place name resolved to a coordinate by a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    coordinate: Coordinate,
    display_name: String,
}

impl GeocodeResult {
    /// Create a result. Geocoder implementations are the only callers.
    pub fn new(coordinate: Coordinate, display_name: impl Into<String>) -> Self {
        Self {
            coordinate,
            display_name: display_name.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Normalized name as reported by the geocoder.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
