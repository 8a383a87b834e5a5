//! # Sunlog Server
//!
//! Main entry point: loads configuration, connects MySQL, wires the DI
//! module, and serves the REST API until shutdown.

use std::sync::Arc;
use sunlog_config::ConfigLoader;
use sunlog_core::{SunlogError, SunlogResult};
use sunlog_repository::{DatabasePool, DatabasePoolInterface};
use sunlog_rest::{create_router, AppState};
use sunlog_server::di;
use sunlog_service::{LocationService, SunriseSunsetService};
use tokio::signal;
use tracing::{error, info};

use shaku::HasComponent;

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Sunlog server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> SunlogResult<()> {
    // Load configuration
    let config = ConfigLoader::from_default_location().load()?;
    info!("Environment: {}", config.app.environment);

    // Create database pool and run migrations
    let db_pool = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }
    let pool = db_pool.try_pool()?.clone();

    // Build DI module - the registry owning caches and the counter
    let context = di::build_app_module(pool, &config)?;

    let location_service: Arc<dyn LocationService> = context.module.resolve();
    let sunrise_sunset_service: Arc<dyn SunriseSunsetService> = context.module.resolve();

    // Create application state for REST
    let state = AppState::new(
        location_service,
        sunrise_sunset_service,
        context.request_counter.clone(),
        config.lookup.clone(),
    );

    let router = create_router(state, &config.server);

    let rest_addr = config.server.rest_addr();
    info!("Starting REST server on http://{}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| SunlogError::internal(format!("Failed to bind REST: {}", e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SunlogError::internal(format!("REST server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sunlog=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
