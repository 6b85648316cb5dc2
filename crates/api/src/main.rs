use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alsidr_api::config::ServerConfig;
use alsidr_api::router::build_app_router;
use alsidr_api::state::AppState;
use alsidr_engine::DashboardController;
use alsidr_events::{EventBus, EventLogger};

const DEFAULT_LOG_FILTER: &str =
    "alsidr_api=debug,alsidr_engine=debug,alsidr_events=info,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        tick_secs = config.simulation.tick_period.as_secs(),
        autostart = config.simulation.autostart,
        initial_tier = %config.simulation.initial_tier,
        "Loaded server configuration"
    );

    // Subscribe the logger before the controller exists so the first
    // clock events are not missed.
    let event_bus = Arc::new(EventBus::default());
    let logger = tokio::spawn(EventLogger::run(event_bus.subscribe()));

    let controller = Arc::new(
        DashboardController::new(config.simulation.clone(), Arc::clone(&event_bus))
            .expect("Invalid initial dashboard state"),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        controller: Arc::clone(&controller),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config).expect("Invalid CORS configuration");

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Dashboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");
    controller.shutdown().await;
    drop(controller);
    drop(event_bus);
    drain_event_logger(logger, Duration::from_secs(config.shutdown_timeout_secs)).await;

    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for the logger to see the bus close.
///
/// The bus only closes once every `Arc<EventBus>` is gone (the router state,
/// the controller and its clock), so callers drop theirs first.
async fn drain_event_logger(logger: JoinHandle<u64>, timeout: Duration) {
    match tokio::time::timeout(timeout, logger).await {
        Ok(Ok(seen)) => tracing::info!(seen, "Event logger drained"),
        Ok(Err(e)) => tracing::error!(error = %e, "Event logger task failed"),
        Err(_) => tracing::warn!(
            timeout_secs = timeout.as_secs(),
            "Event logger did not stop within the shutdown timeout"
        ),
    }
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
