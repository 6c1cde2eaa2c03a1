//! Route quotes and journeys.
//!
//! A `RouteQuote` is the result of resolving a source and destination;
//! a `Journey` is an active trip created from a quote plus the distance
//! at which the traveler wants to be woken.

use chrono::{DateTime, Utc};

use super::{Coordinate, GeocodeResult, distance_km, round2};

/// A resolved source/destination pair and the distance between them.
///
/// Immutable once created. Re-querying produces a new quote rather than
/// changing an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuote {
    source_name: String,
    source: GeocodeResult,
    destination_name: String,
    destination: GeocodeResult,
    total_distance_km: f64,
}

impl RouteQuote {
    /// Create a quote, computing the great-circle distance between the
    /// two resolved places.
    pub fn new(
        source_name: impl Into<String>,
        source: GeocodeResult,
        destination_name: impl Into<String>,
        destination: GeocodeResult,
    ) -> Self {
        let total_distance_km = distance_km(source.coordinate(), destination.coordinate());
        Self {
            source_name: source_name.into(),
            source,
            destination_name: destination_name.into(),
            destination,
            total_distance_km,
        }
    }

    /// The source name as the user typed it.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source(&self) -> &GeocodeResult {
        &self.source
    }

    /// The destination name as the user typed it.
    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    pub fn destination(&self) -> &GeocodeResult {
        &self.destination
    }

    /// Total straight-line distance at full precision.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Total distance rounded to two decimals.
    pub fn total_distance_display(&self) -> f64 {
        round2(self.total_distance_km)
    }
}

/// Error returned when the alarm distance is not a positive, finite number.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("alarm distance must be a positive number of kilometres, got {0}")]
pub struct InvalidAlarmDistance(pub f64);

/// An active trip.
///
/// Only the two trigger flags ever change after creation, and they only
/// ever go from `false` to `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    source_name: String,
    source_coord: Coordinate,
    destination_name: String,
    destination_coord: Coordinate,
    total_distance_km: f64,
    alarm_distance_km: f64,
    started_at: DateTime<Utc>,
    alarm_triggered: bool,
    emergency_triggered: bool,
}

impl Journey {
    /// Start a journey along `quote`, alarming within `alarm_distance_km`
    /// of the destination.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alarm_distance_km` is zero, negative or not finite.
    /// A threshold at or beyond the total distance is accepted; see
    /// [`Journey::threshold_warning`].
    pub fn start(
        quote: &RouteQuote,
        alarm_distance_km: f64,
        started_at: DateTime<Utc>,
    ) -> Result<Self, InvalidAlarmDistance> {
        if !alarm_distance_km.is_finite() || alarm_distance_km <= 0.0 {
            return Err(InvalidAlarmDistance(alarm_distance_km));
        }

        Ok(Self {
            source_name: quote.source_name().to_string(),
            source_coord: quote.source().coordinate(),
            destination_name: quote.destination_name().to_string(),
            destination_coord: quote.destination().coordinate(),
            total_distance_km: quote.total_distance_km(),
            alarm_distance_km,
            started_at,
            alarm_triggered: false,
            emergency_triggered: false,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source_coord(&self) -> Coordinate {
        self.source_coord
    }

    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    pub fn destination_coord(&self) -> Coordinate {
        self.destination_coord
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn alarm_distance_km(&self) -> f64 {
        self.alarm_distance_km
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn alarm_triggered(&self) -> bool {
        self.alarm_triggered
    }

    pub fn emergency_triggered(&self) -> bool {
        self.emergency_triggered
    }

    /// A warning when the alarm radius already covers the whole route,
    /// meaning the alarm will fire at or near the start.
    pub fn threshold_warning(&self) -> Option<String> {
        (self.alarm_distance_km >= self.total_distance_km).then(|| {
            format!(
                "alarm distance {} km is not less than the route distance {:.2} km; \
                 the alarm will fire straight away",
                self.alarm_distance_km, self.total_distance_km
            )
        })
    }

    /// Record that the alarm has fired. Returns `true` if this call set
    /// the flag, `false` if it was already set.
    pub fn mark_alarm_triggered(&mut self) -> bool {
        !std::mem::replace(&mut self.alarm_triggered, true)
    }

    /// Record that an emergency was raised. Returns `true` if this call
    /// set the flag, `false` if it was already set.
    pub fn mark_emergency_triggered(&mut self) -> bool {
        !std::mem::replace(&mut self.emergency_triggered, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn place(lat: f64, lon: f64, name: &str) -> GeocodeResult {
        GeocodeResult::new(Coordinate::new(lat, lon).unwrap(), name)
    }

    fn quote() -> RouteQuote {
        RouteQuote::new(
            "A",
            place(0.0, 0.0, "Place A"),
            "B",
            place(0.0, 1.0, "Place B"),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 3, 8, 30, 0).unwrap()
    }

    #[test]
    fn quote_computes_distance() {
        let q = quote();
        assert!((q.total_distance_km() - 111.195).abs() < 0.01);
        assert_eq!(q.total_distance_display(), 111.19);
        assert_eq!(q.source_name(), "A");
        assert_eq!(q.destination().display_name(), "Place B");
    }

    #[test]
    fn start_copies_quote() {
        let q = quote();
        let j = Journey::start(&q, 5.0, now()).unwrap();

        assert_eq!(j.source_name(), "A");
        assert_eq!(j.destination_name(), "B");
        assert_eq!(j.destination_coord(), q.destination().coordinate());
        assert_eq!(j.total_distance_km(), q.total_distance_km());
        assert_eq!(j.alarm_distance_km(), 5.0);
        assert_eq!(j.started_at(), now());
        assert!(!j.alarm_triggered());
        assert!(!j.emergency_triggered());
    }

    #[test]
    fn start_rejects_bad_threshold() {
        let q = quote();
        assert_eq!(
            Journey::start(&q, 0.0, now()),
            Err(InvalidAlarmDistance(0.0))
        );
        assert!(Journey::start(&q, -1.0, now()).is_err());
        assert!(Journey::start(&q, f64::NAN, now()).is_err());
        assert!(Journey::start(&q, f64::INFINITY, now()).is_err());
    }

    #[test]
    fn threshold_beyond_route_is_a_warning() {
        let q = quote();
        let j = Journey::start(&q, 500.0, now()).unwrap();
        let warning = j.threshold_warning().unwrap();
        assert!(warning.contains("500 km"));

        let j = Journey::start(&q, 5.0, now()).unwrap();
        assert!(j.threshold_warning().is_none());
    }

    #[test]
    fn alarm_trigger_is_idempotent() {
        let mut j = Journey::start(&quote(), 5.0, now()).unwrap();
        assert!(j.mark_alarm_triggered());
        assert!(!j.mark_alarm_triggered());
        assert!(j.alarm_triggered());
    }

    #[test]
    fn triggers_are_independent() {
        let mut j = Journey::start(&quote(), 5.0, now()).unwrap();

        j.mark_emergency_triggered();
        assert!(j.emergency_triggered());
        assert!(!j.alarm_triggered());

        j.mark_alarm_triggered();
        assert!(j.alarm_triggered());
        assert!(j.emergency_triggered());
    }
}
