//! Checks configuration and database reachability before deploying the API.
//!
//! Usage: `cargo run --bin preflight`

use restaurant_service::infra::logging;
use restaurant_service::{AppConfig, PgRestaurantStore, RestaurantStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("configuration is invalid: {}", e))?;

    info!("> Preflight:");
    info!("  PG_HOST={}", config.db.host);
    info!("  PG_PORT={}", config.db.port);
    info!("  PG_DATABASE={}", config.db.database);
    info!("  PG_USER={}", config.db.user);
    info!("  BIND_ADDR={}", config.server.bind_addr);

    let store = PgRestaurantStore::connect(&config.db).await.map_err(|e| {
        anyhow::anyhow!(
            "cannot connect to {}:{}/{}: {}",
            config.db.host,
            config.db.port,
            config.db.database,
            e
        )
    })?;

    store.ping().await?;
    info!("  Database answers queries.");

    store.ensure_schema().await?;
    let rows = store.count().await?;
    info!("  restaurants table present ({} rows).", rows);

    store.close().await;
    info!("> Preflight OK.");
    Ok(())
}
