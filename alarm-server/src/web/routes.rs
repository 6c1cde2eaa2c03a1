//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::Coordinate;
use crate::error::AlarmError;
use crate::geocode::Geocoder;
use crate::route::resolve_route;
use crate::session::SessionId;

use super::dto::*;
use super::state::AppState;

/// Header carrying the caller's session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Create the application router.
pub fn create_router<G: Geocoder + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/session", post(new_session))
        .route("/api/geocode", post(geocode_route::<G>))
        .route("/api/setup-alarm", post(setup_alarm::<G>))
        .route("/api/get-journey", get(get_journey::<G>))
        .route("/api/update-location", post(update_location::<G>))
        .route("/api/trigger-alarm", post(trigger_alarm::<G>))
        .route("/api/trigger-emergency", post(trigger_emergency::<G>))
        .route("/api/reset", post(reset::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Mint a session id for a new client.
async fn new_session() -> Json<SessionResponse> {
    Json(SessionResponse {
        success: true,
        session_id: SessionId::generate().to_string(),
    })
}

/// Resolve source and destination names and remember the route.
async fn geocode_route<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ResolveRouteResponse>, AppError> {
    let session = session_id(&headers)?;
    let req: ResolveRouteRequest = parse_json(&body)?;

    let quote = resolve_route(
        state.geocoder.as_ref(),
        req.source.as_deref().unwrap_or_default(),
        req.destination.as_deref().unwrap_or_default(),
    )
    .await?;

    let route = RouteSummary::from_quote(&quote);
    state.sessions.store_route(&session, quote).await;

    Ok(Json(ResolveRouteResponse {
        success: true,
        route,
    }))
}

/// Start a journey along the session's route.
async fn setup_alarm<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SetupAlarmResponse>, AppError> {
    let session = session_id(&headers)?;
    let req: SetupAlarmRequest = parse_json(&body)?;
    let alarm_distance = NumericField::require(req.alarm_distance.as_ref(), "alarm_distance")?;

    let journey = state
        .sessions
        .start_journey(&session, alarm_distance)
        .await?;

    Ok(Json(SetupAlarmResponse {
        success: true,
        message: "Journey initialized".to_string(),
        warning: journey.threshold_warning(),
    }))
}

/// Current journey snapshot.
async fn get_journey<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
) -> Result<Json<JourneySnapshot>, AppError> {
    let session = session_id(&headers)?;
    let journey = state.sessions.journey(&session).await?;
    Ok(Json(JourneySnapshot::from_journey(&journey)))
}

/// Evaluate the traveler's position against the active journey.
async fn update_location<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LocationUpdateResponse>, AppError> {
    let session = session_id(&headers)?;
    let req: UpdateLocationRequest = parse_json(&body)?;
    let lat = NumericField::require(req.lat.as_ref(), "lat")?;
    let lon = NumericField::require(req.lon.as_ref(), "lon")?;
    let current = Coordinate::new(lat, lon).map_err(AlarmError::from)?;

    let (journey, report) = state.sessions.update_location(&session, current).await?;
    Ok(Json(LocationUpdateResponse::from_report(&journey, &report)))
}

/// Record that the alarm fired. Succeeds even without a journey.
async fn trigger_alarm<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
) -> Result<Json<AckResponse>, AppError> {
    let session = session_id(&headers)?;
    state.sessions.mark_alarm_triggered(&session).await;
    Ok(Json(AckResponse::new("Alarm triggered")))
}

/// Record that an emergency was raised. Succeeds even without a journey.
async fn trigger_emergency<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
) -> Result<Json<AckResponse>, AppError> {
    let session = session_id(&headers)?;
    state.sessions.mark_emergency_triggered(&session).await;
    Ok(Json(AckResponse::new("Emergency triggered")))
}

/// Clear the session's route and journey.
async fn reset<G: Geocoder>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
) -> Result<Json<AckResponse>, AppError> {
    let session = session_id(&headers)?;
    state.sessions.reset(&session).await;
    Ok(Json(AckResponse::new("System reset")))
}

/// Read and validate the session header.
fn session_id(headers: &HeaderMap) -> Result<SessionId, AppError> {
    let raw = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AlarmError::InvalidInput(format!("Missing {SESSION_HEADER} header"))
        })?;

    SessionId::parse(raw.trim())
        .map_err(|e| AppError::from(AlarmError::InvalidInput(e.to_string())))
}

/// Parse a JSON body, logging it when it doesn't parse.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::from(AlarmError::InvalidInput(format!("Invalid JSON: {e}")))
    })
}

/// Application error type.
#[derive(Debug)]
pub struct AppError(pub AlarmError);

impl From<AlarmError> for AppError {
    fn from(e: AlarmError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(err) = self;
        let status = StatusCode::BAD_REQUEST;

        warn!(status = %status, kind = err.kind(), "{err}");

        let body = Json(ErrorResponse {
            success: false,
            kind: err.kind().to_string(),
            error: err.to_string(),
        });
        (status, body).into_response()
    }
}
