//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{Coordinate, Journey, ProximityReport, RouteQuote, evaluate};
use crate::error::{AlarmError, Missing};

use super::SessionId;

/// Default idle time before a session is forgotten: 6 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    /// How long a session survives without being touched.
    pub ttl: Duration,
}

impl SessionStoreConfig {
    /// Create a config with the default TTL (6 hours).
    pub fn new() -> Self {
        Self { ttl: DEFAULT_TTL }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// State held for one session.
#[derive(Debug)]
struct SessionState {
    route: Option<RouteQuote>,
    journey: Option<Journey>,
    last_seen: Instant,
}

impl SessionState {
    fn new() -> Self {
        Self {
            route: None,
            journey: None,
            last_seen: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

/// Thread-safe map from session id to journey state.
///
/// All mutations happen under the write lock, so concurrent trigger and
/// location calls on the same session cannot lose updates. Sessions idle
/// for longer than the TTL behave as empty and are dropped on next access
/// or by [`SessionStore::purge_expired`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<SessionId, SessionState>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new(config: &SessionStoreConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: config.ttl,
        }
    }

    /// Save a freshly resolved route, replacing any earlier quote.
    ///
    /// An active journey is left as it is.
    pub async fn store_route(&self, id: &SessionId, quote: RouteQuote) {
        let mut sessions = self.inner.write().await;
        let state = sessions
            .entry(id.clone())
            .or_insert_with(SessionState::new);
        if state.is_expired(self.ttl) {
            *state = SessionState::new();
        }

        state.last_seen = Instant::now();
        state.route = Some(quote);
    }

    /// Start a journey from the session's current route.
    ///
    /// Returns a snapshot of the new journey. A threshold at or beyond
    /// the route length is allowed and logged as a warning.
    ///
    /// # Errors
    ///
    /// - `MissingContext(Route)` if no route has been resolved
    /// - `InvalidInput` if the alarm distance is not positive
    pub async fn start_journey(
        &self,
        id: &SessionId,
        alarm_distance_km: f64,
    ) -> Result<Journey, AlarmError> {
        let mut sessions = self.inner.write().await;
        let state = live_session(&mut sessions, id, self.ttl)
            .ok_or(AlarmError::MissingContext(Missing::Route))?;
        let quote = state
            .route
            .as_ref()
            .ok_or(AlarmError::MissingContext(Missing::Route))?;

        let journey = Journey::start(quote, alarm_distance_km, Utc::now())?;
        if let Some(warning) = journey.threshold_warning() {
            warn!(session = %id, "{warning}");
        }

        info!(
            session = %id,
            destination = journey.destination_name(),
            alarm_km = alarm_distance_km,
            "journey started"
        );
        state.journey = Some(journey.clone());
        Ok(journey)
    }

    /// Snapshot of the session's active journey.
    pub async fn journey(&self, id: &SessionId) -> Result<Journey, AlarmError> {
        let mut sessions = self.inner.write().await;
        live_session(&mut sessions, id, self.ttl)
            .and_then(|state| state.journey.clone())
            .ok_or(AlarmError::MissingContext(Missing::Journey))
    }

    /// Evaluate a position reading against the active journey.
    ///
    /// The journey is copied out under the lock and evaluated outside it;
    /// evaluation never changes stored state.
    pub async fn update_location(
        &self,
        id: &SessionId,
        current: Coordinate,
    ) -> Result<(Journey, ProximityReport), AlarmError> {
        let journey = self.journey(id).await?;
        let report = evaluate(&journey, current);

        debug!(
            session = %id,
            %current,
            remaining_km = report.display_distance_km(),
            should_alarm = report.should_alarm,
            "location update"
        );
        Ok((journey, report))
    }

    /// Mark the alarm as fired. Returns `false`, and does nothing, when
    /// the session has no journey.
    pub async fn mark_alarm_triggered(&self, id: &SessionId) -> bool {
        self.with_journey(id, |journey| {
            if journey.mark_alarm_triggered() {
                info!(session = %id, "alarm triggered");
            }
        })
        .await
    }

    /// Mark an emergency as raised. Returns `false`, and does nothing,
    /// when the session has no journey.
    pub async fn mark_emergency_triggered(&self, id: &SessionId) -> bool {
        self.with_journey(id, |journey| {
            if journey.mark_emergency_triggered() {
                warn!(session = %id, "emergency triggered");
            }
        })
        .await
    }

    /// Forget the session's route and journey. Returns whether there was
    /// anything to forget.
    pub async fn reset(&self, id: &SessionId) -> bool {
        let mut sessions = self.inner.write().await;
        let existed = sessions.remove(id).is_some();
        if existed {
            info!(session = %id, "session reset");
        }
        existed
    }

    /// Drop every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, state| !state.is_expired(self.ttl));
        before - sessions.len()
    }

    /// Number of sessions held, including any not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    async fn with_journey(&self, id: &SessionId, f: impl FnOnce(&mut Journey)) -> bool {
        let mut sessions = self.inner.write().await;
        match live_session(&mut sessions, id, self.ttl).and_then(|s| s.journey.as_mut()) {
            Some(journey) => {
                f(journey);
                true
            }
            None => false,
        }
    }
}

/// Look up a session, dropping it if it has expired and refreshing its
/// idle timer otherwise.
fn live_session<'a>(
    sessions: &'a mut HashMap<SessionId, SessionState>,
    id: &SessionId,
    ttl: Duration,
) -> Option<&'a mut SessionState> {
    if sessions.get(id).is_some_and(|state| state.is_expired(ttl)) {
        sessions.remove(id);
        debug!(session = %id, "session expired");
        return None;
    }

    let state = sessions.get_mut(id)?;
    state.last_seen = Instant::now();
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EARTH_RADIUS_KM, GeocodeResult};

    fn id(s: &str) -> SessionId {
        SessionId::parse(s).unwrap()
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn lon_for_km(km: f64) -> f64 {
        (km / EARTH_RADIUS_KM).to_degrees()
    }

    /// 50 km along the equator, ending at (0, 0).
    fn quote() -> RouteQuote {
        RouteQuote::new(
            "CityA",
            GeocodeResult::new(coord(0.0, -lon_for_km(50.0)), "City A"),
            "CityB",
            GeocodeResult::new(coord(0.0, 0.0), "City B"),
        )
    }

    fn store() -> SessionStore {
        SessionStore::new(&SessionStoreConfig::default())
    }

    #[test]
    fn config_defaults() {
        let config = SessionStoreConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(21600));

        let config = SessionStoreConfig::new().with_ttl(Duration::from_secs(5));
        assert_eq!(config.ttl, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn start_without_route_is_missing_context() {
        let store = store();
        let err = store.start_journey(&id("s1"), 5.0).await.unwrap_err();
        assert_eq!(err, AlarmError::MissingContext(Missing::Route));
    }

    #[tokio::test]
    async fn full_journey_flow() {
        let store = store();
        let s = id("s1");

        store.store_route(&s, quote()).await;
        let journey = store.start_journey(&s, 5.0).await.unwrap();
        assert_eq!(journey.alarm_distance_km(), 5.0);

        let (_, report) = store
            .update_location(&s, coord(0.0, -lon_for_km(4.2)))
            .await
            .unwrap();
        assert!(report.should_alarm);
        assert_eq!(report.display_distance_km(), 4.2);

        let (_, report) = store
            .update_location(&s, coord(0.0, -lon_for_km(10.0)))
            .await
            .unwrap();
        assert!(!report.should_alarm);

        // Polling never flips the stored flag.
        assert!(!store.journey(&s).await.unwrap().alarm_triggered());
    }

    #[tokio::test]
    async fn invalid_threshold_keeps_route() {
        let store = store();
        let s = id("s1");
        store.store_route(&s, quote()).await;

        let err = store.start_journey(&s, 0.0).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_input");

        // The route is still there for a corrected retry.
        assert!(store.start_journey(&s, 2.0).await.is_ok());
    }

    #[tokio::test]
    async fn triggers_are_idempotent_and_independent() {
        let store = store();
        let s = id("s1");
        store.store_route(&s, quote()).await;
        store.start_journey(&s, 5.0).await.unwrap();

        assert!(store.mark_alarm_triggered(&s).await);
        assert!(store.mark_alarm_triggered(&s).await);
        let journey = store.journey(&s).await.unwrap();
        assert!(journey.alarm_triggered());
        assert!(!journey.emergency_triggered());

        assert!(store.mark_emergency_triggered(&s).await);
        let journey = store.journey(&s).await.unwrap();
        assert!(journey.alarm_triggered());
        assert!(journey.emergency_triggered());
    }

    #[tokio::test]
    async fn triggers_without_journey_are_no_ops() {
        let store = store();
        let s = id("s1");
        assert!(!store.mark_alarm_triggered(&s).await);
        assert!(!store.mark_emergency_triggered(&s).await);

        store.store_route(&s, quote()).await;
        assert!(!store.mark_alarm_triggered(&s).await);
    }

    #[tokio::test]
    async fn reset_clears_route_and_journey() {
        let store = store();
        let s = id("s1");
        store.store_route(&s, quote()).await;
        store.start_journey(&s, 5.0).await.unwrap();

        assert!(store.reset(&s).await);
        assert_eq!(
            store.journey(&s).await.unwrap_err(),
            AlarmError::MissingContext(Missing::Journey)
        );
        assert_eq!(
            store.start_journey(&s, 5.0).await.unwrap_err(),
            AlarmError::MissingContext(Missing::Route)
        );
        assert!(!store.reset(&s).await);
    }

    #[tokio::test]
    async fn new_route_keeps_active_journey() {
        let store = store();
        let s = id("s1");
        store.store_route(&s, quote()).await;
        store.start_journey(&s, 5.0).await.unwrap();

        let other = RouteQuote::new(
            "CityC",
            GeocodeResult::new(coord(10.0, 10.0), "City C"),
            "CityD",
            GeocodeResult::new(coord(11.0, 10.0), "City D"),
        );
        store.store_route(&s, other).await;

        let journey = store.journey(&s).await.unwrap();
        assert_eq!(journey.destination_name(), "CityB");

        // Starting again uses the new quote.
        let journey = store.start_journey(&s, 5.0).await.unwrap();
        assert_eq!(journey.destination_name(), "CityD");
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = store();
        let a = id("a");
        let b = id("b");
        store.store_route(&a, quote()).await;
        store.start_journey(&a, 5.0).await.unwrap();

        assert!(store.journey(&b).await.is_err());
        assert!(!store.mark_alarm_triggered(&b).await);
        assert!(!store.journey(&a).await.unwrap().alarm_triggered());
    }

    #[tokio::test]
    async fn expired_sessions_behave_as_empty() {
        let store = SessionStore::new(&SessionStoreConfig::new().with_ttl(Duration::ZERO));
        let s = id("s1");
        store.store_route(&s, quote()).await;

        // With zero TTL the session is expired as soon as it is written.
        assert_eq!(
            store.start_journey(&s, 5.0).await.unwrap_err(),
            AlarmError::MissingContext(Missing::Route)
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let store = SessionStore::new(&SessionStoreConfig::new().with_ttl(Duration::ZERO));
        store.store_route(&id("a"), quote()).await;
        store.store_route(&id("b"), quote()).await;
        assert_eq!(store.len().await, 2);
        assert_eq!(store.purge_expired().await, 2);
        assert!(store.is_empty().await);

        let store = store_with_route("c").await;
        assert_eq!(store.purge_expired().await, 0);
        assert_eq!(store.len().await, 1);
    }

    async fn store_with_route(name: &str) -> SessionStore {
        let store = store();
        store.store_route(&id(name), quote()).await;
        store
    }

    #[tokio::test]
    async fn concurrent_triggers_do_not_lose_updates() {
        let store = store();
        let s = id("s1");
        store.store_route(&s, quote()).await;
        store.start_journey(&s, 5.0).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            let s = s.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    store.mark_alarm_triggered(&s).await;
                } else {
                    store.mark_emergency_triggered(&s).await;
                }
                store.update_location(&s, coord(0.0, 0.0)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let journey = store.journey(&s).await.unwrap();
        assert!(journey.alarm_triggered());
        assert!(journey.emergency_triggered());
    }
}
