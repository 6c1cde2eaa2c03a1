//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::geocode::NominatimConfig;
use crate::session::SessionStoreConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Error reading configuration.
#[derive(Debug, Error, PartialEq)]
#[error("invalid {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Nominatim client settings
    pub geocoder: NominatimConfig,

    /// Session expiry settings
    pub sessions: SessionStoreConfig,

    /// When set, places are served from this JSON file instead of Nominatim
    pub fixtures_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `ALARM_BIND_ADDR` | `127.0.0.1:5000` |
    /// | `NOMINATIM_URL` | public Nominatim search endpoint |
    /// | `GEOCODER_USER_AGENT` | `GPSAlarmSystem/1.0` |
    /// | `GEOCODER_TIMEOUT_SECS` | `10` |
    /// | `SESSION_TTL_SECS` | `21600` |
    /// | `GEOCODER_FIXTURES` | unset |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_raw = get("ALARM_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError {
            var: "ALARM_BIND_ADDR",
            value: bind_raw.clone(),
            reason: "expected host:port",
        })?;

        let mut geocoder = NominatimConfig::new();
        if let Some(url) = get("NOMINATIM_URL") {
            geocoder = geocoder.with_base_url(url.trim());
        }
        if let Some(user_agent) = get("GEOCODER_USER_AGENT") {
            geocoder = geocoder.with_user_agent(user_agent);
        }
        if let Some(secs) = get("GEOCODER_TIMEOUT_SECS") {
            geocoder = geocoder.with_timeout(positive_secs("GEOCODER_TIMEOUT_SECS", &secs)?);
        }

        let mut sessions = SessionStoreConfig::new();
        if let Some(secs) = get("SESSION_TTL_SECS") {
            let ttl = positive_secs("SESSION_TTL_SECS", &secs)?;
            sessions = sessions.with_ttl(Duration::from_secs(ttl));
        }

        let fixtures_path = get("GEOCODER_FIXTURES").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            geocoder,
            sessions,
            fixtures_path,
        })
    }
}

fn positive_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError {
            var,
            value: raw.to_string(),
            reason: "expected a positive whole number of seconds",
        }),
    }
}
