//! Geographic coordinate type.

use std::fmt;

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value allowed on this axis, in degrees.
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Error returned when a latitude or longitude is not a usable number.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid {axis}: {value} (must be finite and within ±{})", .axis.limit())]
pub struct InvalidCoordinate {
    pub axis: Axis,
    pub value: f64,
}

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180];
/// both are finite. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use alarm_server::domain::Coordinate;
///
/// let chennai = Coordinate::new(13.0827, 80.2707).unwrap();
/// assert_eq!(chennai.latitude(), 13.0827);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        check(Axis::Latitude, latitude)?;
        check(Axis::Longitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn check(axis: Axis, value: f64) -> Result<(), InvalidCoordinate> {
    let limit = axis.limit();
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(InvalidCoordinate { axis, value })
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}
