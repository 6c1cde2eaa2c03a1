//! Proximity evaluation: how far is the traveler from the destination,
//! and should the alarm go off?

use super::{Coordinate, Journey, distance_km, initial_bearing_deg, round2};

/// Outcome of evaluating one position reading against a journey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityReport {
    /// Unrounded distance from the reading to the destination.
    pub distance_to_destination_km: f64,

    /// Whether the traveler is within the alarm radius (inclusive).
    pub should_alarm: bool,

    /// Share of the straight-line route covered so far, 0 to 100.
    pub progress_percent: f64,

    /// Bearing from the reading towards the destination.
    pub bearing_deg: f64,
}

impl ProximityReport {
    /// Distance rounded to two decimals.
    pub fn display_distance_km(&self) -> f64 {
        round2(self.distance_to_destination_km)
    }
}

/// Evaluate a position reading against a journey.
///
/// The alarm decision compares the unrounded distance with the journey's
/// threshold; rounding is only for display. The journey is not modified:
/// marking the alarm as triggered is a separate, explicit step.
pub fn evaluate(journey: &Journey, current: Coordinate) -> ProximityReport {
    let destination = journey.destination_coord();
    let remaining = distance_km(current, destination);
    let should_alarm = remaining <= journey.alarm_distance_km();

    let total = journey.total_distance_km();
    let progress_percent = if total > 0.0 {
        ((total - remaining) / total * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };

    ProximityReport {
        distance_to_destination_km: remaining,
        should_alarm,
        progress_percent,
        bearing_deg: initial_bearing_deg(current, destination),
    }
}
