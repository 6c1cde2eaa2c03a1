use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alarm_server::config::ServerConfig;
use alarm_server::geocode::{Geocoder, NominatimClient, StaticGeocoder};
use alarm_server::session::SessionStore;
use alarm_server::web::{AppState, create_router};

/// How often idle sessions are swept out.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    match config.fixtures_path.clone() {
        Some(path) => {
            let geocoder = StaticGeocoder::from_file(&path)?;
            info!(path = %path.display(), places = geocoder.len(), "using fixture geocoder");
            serve(config, geocoder).await
        }
        None => {
            info!(url = %config.geocoder.base_url, "using Nominatim geocoder");
            let geocoder = NominatimClient::new(config.geocoder.clone())?;
            serve(config, geocoder).await
        }
    }
}

async fn serve<G: Geocoder + 'static>(
    config: ServerConfig,
    geocoder: G,
) -> Result<(), Box<dyn std::error::Error>> {
    let sessions = SessionStore::new(&config.sessions);

    // Spawn background task to drop idle sessions
    let sessions_purge = sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            let purged = sessions_purge.purge_expired().await;
            if purged > 0 {
                info!(purged, "purged idle sessions");
            }
        }
    });

    let state = AppState::new(geocoder, sessions);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "GPS alarm server listening");
    info!("API endpoints:");
    info!("  GET  /health                - Health check");
    info!("  POST /api/session           - Start a session");
    info!("  POST /api/geocode           - Resolve source and destination");
    info!("  POST /api/setup-alarm       - Start a journey");
    info!("  GET  /api/get-journey       - Current journey");
    info!("  POST /api/update-location   - Report position");
    info!("  POST /api/trigger-alarm     - Record alarm");
    info!("  POST /api/trigger-emergency - Record emergency");
    info!("  POST /api/reset             - Clear session");

    if let Err(e) = axum::serve(listener, app).await {
        warn!(error = %e, "server stopped");
        return Err(e.into());
    }
    Ok(())
}
