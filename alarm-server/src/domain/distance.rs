//! Great-circle distance and bearing.
//!
//! Distances are computed with the haversine formula on a sphere of
//! radius [`EARTH_RADIUS_KM`]. This is a straight-line ("as the crow
//! flies") measure; it knows nothing about roads or rail lines.

use super::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// Symmetric in its arguments, and zero for identical points.
///
/// # Examples
///
/// ```
/// use alarm_server::domain::{Coordinate, distance_km};
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(0.0, 1.0).unwrap();
/// assert!((distance_km(a, b) - 111.19).abs() < 0.5);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` towards `to`, in degrees clockwise from
/// true north, within [0, 360).
pub fn initial_bearing_deg(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlon = (to.longitude() - from.longitude()).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    if bearing >= 360.0 { 0.0 } else { bearing }
}

/// Round to two decimal places, for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coordinate_strategy(), b in coordinate_strategy()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-6, "d(a,b)={} d(b,a)={}", ab, ba);
        }

        #[test]
        fn self_distance_is_zero(a in coordinate_strategy()) {
            prop_assert!(distance_km(a, a).abs() < 1e-9);
        }

        #[test]
        fn distance_is_bounded(a in coordinate_strategy(), b in coordinate_strategy()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn bearing_in_range(a in coordinate_strategy(), b in coordinate_strategy()) {
            let bearing = initial_bearing_deg(a, b);
            prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
        }
    }
}
