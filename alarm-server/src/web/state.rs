//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::Geocoder;
use crate::session::SessionStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<G> {
    /// Place name resolver
    pub geocoder: Arc<G>,

    /// Per-session routes and journeys
    pub sessions: SessionStore,
}

impl<G: Geocoder> AppState<G> {
    /// Create a new app state.
    pub fn new(geocoder: G, sessions: SessionStore) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            sessions,
        }
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            geocoder: Arc::clone(&self.geocoder),
            sessions: self.sessions.clone(),
        }
    }
}
