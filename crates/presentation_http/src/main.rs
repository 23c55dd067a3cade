//! TamilVandi HTTP Server
//!
//! Main entry point for the bus finder API.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{BusFinderService, GeocodingPort, RoutingPort};
use infrastructure::{
    AppConfig, GeocodingAdapter, LoggingConfig, RoutingAdapter, init_logging, load_trips,
};
use presentation_http::{
    routes,
    server::{ShutdownOutcome, serve_until},
    state::AppState,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_logging(&LoggingConfig {
        json: config.server.json_logs(),
        ..LoggingConfig::default()
    })?;

    info!("🚌 TamilVandi v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(problems) = config.validate() {
        for problem in &problems {
            error!(%problem, "Invalid configuration");
        }
        anyhow::bail!("Invalid configuration: {}", problems.join("; "));
    }

    let schedule = load_trips(&config.schedule.path).with_context(|| {
        format!(
            "Failed to load bus schedule from {}",
            config.schedule.path.display()
        )
    })?;
    info!(
        path = %config.schedule.path.display(),
        trips = schedule.len(),
        origins = schedule.list_origins().len(),
        "Schedule loaded"
    );

    let geocoder: Arc<dyn GeocodingPort> = Arc::new(GeocodingAdapter::from_config(
        &config.geocoding.to_nominatim_config(),
    )?);
    let router: Arc<dyn RoutingPort> = Arc::new(RoutingAdapter::from_config(
        &config.routing.to_ors_config(),
    )?);

    let bus_finder = BusFinderService::new(Arc::new(schedule), geocoder, router);
    let state = AppState::new(
        bus_finder,
        Duration::from_secs(config.server.session_idle_minutes.saturating_mul(60)),
    );

    let app = routes::create_app(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let outcome = serve_until(listener, app, shutdown_signal(), shutdown_timeout).await?;
    if outcome == ShutdownOutcome::TimedOut {
        warn!("Some connections were still open at shutdown");
    }

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
