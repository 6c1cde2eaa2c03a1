//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Journey, ProximityReport, RouteQuote, round2};
use crate::error::AlarmError;

/// A numeric field that clients may send either as a JSON number or as a
/// numeric string (form inputs often arrive as strings).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Parse a required numeric field named `name`.
    pub fn require(field: Option<&NumericField>, name: &str) -> Result<f64, AlarmError> {
        let value = match field {
            None => return Err(AlarmError::InvalidInput(format!("Missing {name}"))),
            Some(NumericField::Number(n)) => *n,
            Some(NumericField::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| AlarmError::InvalidInput(format!("{name} must be a number")))?,
        };

        if !value.is_finite() {
            return Err(AlarmError::InvalidInput(format!(
                "{name} must be a finite number"
            )));
        }

        Ok(value)
    }
}

/// Request to resolve a route.
#[derive(Debug, Deserialize)]
pub struct ResolveRouteRequest {
    /// Source place name
    #[serde(default)]
    pub source: Option<String>,

    /// Destination place name
    #[serde(default)]
    pub destination: Option<String>,
}

/// Request to start a journey.
#[derive(Debug, Deserialize)]
pub struct SetupAlarmRequest {
    /// Distance before the destination at which to alarm, in km
    #[serde(default)]
    pub alarm_distance: Option<NumericField>,
}

/// A position reading from the traveler's device.
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    #[serde(default, alias = "latitude")]
    pub lat: Option<NumericField>,

    #[serde(default, alias = "longitude")]
    pub lon: Option<NumericField>,
}

/// Coordinates for display.
#[derive(Debug, Serialize)]
pub struct CoordsView {
    pub lat: f64,
    pub lon: f64,
}

impl CoordsView {
    pub fn from_coordinate(c: Coordinate) -> Self {
        Self {
            lat: c.latitude(),
            lon: c.longitude(),
        }
    }
}

/// Response for a newly minted session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session_id: String,
}

/// A resolved route.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    /// Source name as typed
    pub source: String,

    /// Destination name as typed
    pub destination: String,

    /// Straight-line distance in km, two decimals
    pub total_distance: f64,

    /// Source name as normalized by the geocoder
    pub source_display: String,

    /// Destination name as normalized by the geocoder
    pub destination_display: String,

    pub source_coords: CoordsView,

    pub destination_coords: CoordsView,
}

impl RouteSummary {
    /// Create from a domain RouteQuote.
    pub fn from_quote(quote: &RouteQuote) -> Self {
        Self {
            source: quote.source_name().to_string(),
            destination: quote.destination_name().to_string(),
            total_distance: quote.total_distance_display(),
            source_display: quote.source().display_name().to_string(),
            destination_display: quote.destination().display_name().to_string(),
            source_coords: CoordsView::from_coordinate(quote.source().coordinate()),
            destination_coords: CoordsView::from_coordinate(quote.destination().coordinate()),
        }
    }
}

/// Response for route resolution.
#[derive(Debug, Serialize)]
pub struct ResolveRouteResponse {
    pub success: bool,
    pub route: RouteSummary,
}

/// Response for journey setup.
#[derive(Debug, Serialize)]
pub struct SetupAlarmResponse {
    pub success: bool,
    pub message: String,

    /// Set when the alarm radius covers the whole route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Snapshot of an active journey.
#[derive(Debug, Serialize)]
pub struct JourneySnapshot {
    pub source: String,
    pub source_coords: CoordsView,
    pub destination: String,
    pub destination_coords: CoordsView,

    /// Route length in km, two decimals
    pub total_distance: f64,

    /// Alarm radius in km, as entered
    pub alarm_distance_before: f64,

    /// RFC 3339 start time
    pub started_at: String,

    pub alarm_triggered: bool,
    pub emergency_triggered: bool,
}

impl JourneySnapshot {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            source: journey.source_name().to_string(),
            source_coords: CoordsView::from_coordinate(journey.source_coord()),
            destination: journey.destination_name().to_string(),
            destination_coords: CoordsView::from_coordinate(journey.destination_coord()),
            total_distance: round2(journey.total_distance_km()),
            alarm_distance_before: journey.alarm_distance_km(),
            started_at: journey.started_at().to_rfc3339(),
            alarm_triggered: journey.alarm_triggered(),
            emergency_triggered: journey.emergency_triggered(),
        }
    }
}

/// Response for a location update.
#[derive(Debug, Serialize)]
pub struct LocationUpdateResponse {
    pub success: bool,

    /// Remaining straight-line distance in km, two decimals
    pub distance_to_destination: f64,

    /// The journey's alarm radius in km
    pub alarm_distance_before: f64,

    pub should_alarm: bool,

    /// Share of the route covered, 0 to 100, two decimals
    pub progress_percent: f64,

    /// Bearing to the destination in degrees, two decimals
    pub bearing: f64,
}

impl LocationUpdateResponse {
    /// Create from an evaluation of `journey`.
    pub fn from_report(journey: &Journey, report: &ProximityReport) -> Self {
        Self {
            success: true,
            distance_to_destination: report.display_distance_km(),
            alarm_distance_before: journey.alarm_distance_km(),
            should_alarm: report.should_alarm,
            progress_percent: round2(report.progress_percent),
            bearing: round2(report.bearing_deg),
        }
    }
}

/// Plain acknowledgment.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

impl AckResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// Error category, e.g. "missing_context"
    pub kind: String,

    /// Error message
    pub error: String,
}
