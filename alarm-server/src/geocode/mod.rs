//! Geocoding: turning free-text place names into coordinates.
//!
//! The production implementation talks to Nominatim, the OpenStreetMap
//! search service. Key characteristics:
//! - One request per place, asking for exactly one best match
//! - Every request carries an identifying `User-Agent`, as Nominatim's
//!   usage policy requires
//! - Coordinates come back as numeric strings, not JSON numbers
//!
//! `StaticGeocoder` answers from an in-memory table instead, for tests
//! and offline development.

mod client;
mod error;
mod fixture;
mod types;

use std::future::Future;

use crate::domain::GeocodeResult;

pub use client::{NominatimClient, NominatimConfig};
pub use error::GeocodeError;
pub use fixture::StaticGeocoder;
pub use types::NominatimPlace;

/// Resolves place names to coordinates.
///
/// This abstraction lets route resolution run against a deterministic
/// fake instead of the network.
pub trait Geocoder: Send + Sync {
    /// Look up the single best match for `place_name`.
    ///
    /// Implementations must not panic; every failure is a `GeocodeError`.
    fn geocode(
        &self,
        place_name: &str,
    ) -> impl Future<Output = Result<GeocodeResult, GeocodeError>> + Send;
}
