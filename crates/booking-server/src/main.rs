//! # Booking Gateway Server
//!
//! Main entry point: loads configuration, wires the cache-aside booking
//! service, and serves the REST API until a shutdown signal arrives.

use booking_config::ConfigLoader;
use booking_core::telemetry::{init_logging, LogFormat};
use booking_core::{BookingError, BookingResult};
use booking_rest::create_router;
use booking_server::{
    di::AppComponents,
    startup::{print_banner, print_startup_info},
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> BookingResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;

    let observability = &config_loader.config().observability;
    init_logging(
        Some(observability.log_level.as_str()),
        LogFormat::parse(&observability.log_format),
    );
    print_banner();

    // Validation ran before a subscriber existed
    for warning in config_loader.warnings() {
        warn!("{}", warning);
    }
    let config = config_loader.into_config();

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let components = AppComponents::build(&config).await?;
    let router = create_router(components.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BookingError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&addr, components.cache().backend());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BookingError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
