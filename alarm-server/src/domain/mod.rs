//! Domain types for the travel alarm.
//!
//! This module contains the pure core: validated coordinates, distance
//! maths, route quotes, journeys and the proximity decision. Nothing here
//! performs I/O, so every function can be tested directly.

mod coordinate;
mod distance;
mod journey;
mod place;
mod proximity;

pub use coordinate::{Axis, Coordinate, InvalidCoordinate};
pub use distance::{EARTH_RADIUS_KM, distance_km, initial_bearing_deg, round2};
pub use journey::{InvalidAlarmDistance, Journey, RouteQuote};
pub use place::GeocodeResult;
pub use proximity::{ProximityReport, evaluate};
