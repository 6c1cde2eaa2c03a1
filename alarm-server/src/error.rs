//! Error taxonomy for alarm operations.
//!
//! Every operation reports one of these instead of panicking. None of
//! them is fatal: the caller can always try again.

use std::fmt;

use crate::domain::{InvalidAlarmDistance, InvalidCoordinate};

/// Which end of a route a place name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Destination => f.write_str("destination"),
        }
    }
}

/// Context an operation needed but the session did not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// No route has been resolved yet.
    Route,
    /// No journey has been started.
    Journey,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Route => f.write_str("No route data"),
            Missing::Journey => f.write_str("No active journey"),
        }
    }
}

/// Errors from alarm operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlarmError {
    /// A place name could not be geocoded. Covers both "no match" and
    /// "provider unreachable"; only the logs tell them apart.
    #[error("Could not find {side}: {name}")]
    Unresolved { side: Side, name: String },

    /// The operation needs a route or journey that does not exist.
    #[error("{0}")]
    MissingContext(Missing),

    /// A field failed to parse or broke a range constraint.
    #[error("{0}")]
    InvalidInput(String),
}

impl AlarmError {
    /// Stable machine-readable name for the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            AlarmError::Unresolved { .. } => "resolution_failure",
            AlarmError::MissingContext(_) => "missing_context",
            AlarmError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<InvalidCoordinate> for AlarmError {
    fn from(e: InvalidCoordinate) -> Self {
        AlarmError::InvalidInput(e.to_string())
    }
}

impl From<InvalidAlarmDistance> for AlarmError {
    fn from(e: InvalidAlarmDistance) -> Self {
        AlarmError::InvalidInput(e.to_string())
    }
}
