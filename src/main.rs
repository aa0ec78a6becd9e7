//! Restaurant API server.

use restaurant_service::infra::logging;
use restaurant_service::transport;
use restaurant_service::{AppConfig, PgRestaurantStore, RestaurantService, RestaurantStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    // --- Configuration ---
    let config = AppConfig::from_env()?;
    info!(db = ?config.db, bind_addr = %config.server.bind_addr, "configuration loaded");

    // --- Storage Initialization ---
    let store = PgRestaurantStore::connect(&config.db).await?;
    store.ensure_schema().await?;
    info!("restaurants table ready");

    let service = RestaurantService::new(Arc::new(store.clone()));
    let app = transport::http::create_app(transport::http::AppState::new(service));

    // --- API Server Initialization ---
    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests have drained; release the pool last.
    store.close().await;
    info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
