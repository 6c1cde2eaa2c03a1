//! Route resolution: geocode both ends and quote the distance.

use tracing::{info, warn};

use crate::domain::RouteQuote;
use crate::error::{AlarmError, Side};
use crate::geocode::{GeocodeError, Geocoder};

/// Resolve a source and destination name into a `RouteQuote`.
///
/// Both names are looked up concurrently, once each. If the source
/// cannot be resolved that is reported first, whatever happened to the
/// destination.
///
/// # Errors
///
/// - `InvalidInput` if either name is blank
/// - `Unresolved` naming the side that failed; provider outages and
///   "no match" look the same to the caller
pub async fn resolve_route<G: Geocoder>(
    geocoder: &G,
    source_name: &str,
    destination_name: &str,
) -> Result<RouteQuote, AlarmError> {
    let source_name = source_name.trim();
    let destination_name = destination_name.trim();

    if source_name.is_empty() || destination_name.is_empty() {
        return Err(AlarmError::InvalidInput("Missing place names".to_string()));
    }

    let (source, destination) = tokio::join!(
        geocoder.geocode(source_name),
        geocoder.geocode(destination_name)
    );

    let source = source.map_err(|e| unresolved(Side::Source, source_name, e))?;
    let destination = destination.map_err(|e| unresolved(Side::Destination, destination_name, e))?;

    let quote = RouteQuote::new(source_name, source, destination_name, destination);
    info!(
        source = source_name,
        destination = destination_name,
        total_km = quote.total_distance_display(),
        "resolved route"
    );

    Ok(quote)
}

fn unresolved(side: Side, name: &str, error: GeocodeError) -> AlarmError {
    if error.is_no_match() {
        info!(%side, name, "no geocoding match");
    } else {
        warn!(%side, name, %error, "geocoding provider unavailable");
    }

    AlarmError::Unresolved {
        side,
        name: name.to_string(),
    }
}
