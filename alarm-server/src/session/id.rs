//! Session identifiers.

use std::fmt;

use uuid::Uuid;

/// Longest accepted session id.
const MAX_LEN: usize = 128;

/// Error returned when parsing an invalid session id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid session id: {reason}")]
pub struct InvalidSessionId {
    reason: &'static str,
}

/// An opaque session identifier.
///
/// 1 to 128 characters drawn from ASCII letters, digits, `-` and `_`.
///
/// # Examples
///
/// ```
/// use alarm_server::session::SessionId;
///
/// let id = SessionId::parse("trip-42").unwrap();
/// assert_eq!(id.as_str(), "trip-42");
///
/// assert!(SessionId::parse("").is_err());
/// assert!(SessionId::parse("has space").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Parse a session id supplied by a client.
    pub fn parse(s: &str) -> Result<Self, InvalidSessionId> {
        if s.is_empty() {
            return Err(InvalidSessionId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidSessionId {
                reason: "must be at most 128 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidSessionId {
                reason: "must contain only ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(Self(s.to_string()))
    }

    /// Mint a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
