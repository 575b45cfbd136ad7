use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use signin_infrastructure::config::{default_log_dir, AppConfig};
use signin_infrastructure::logging;
use signin_infrastructure::persistence::repositories::SqliteBitmapStore;
use signin_infrastructure::persistence::Database;

use super::state::AppState;

/// Load config, start logging and open the store. Nothing is read or written here.
pub async fn initialize(config_path: Option<PathBuf>, log_dir: Option<PathBuf>) -> Result<AppState> {
    let config = AppConfig::load(config_path.as_deref())?;

    let log_dir = log_dir.unwrap_or_else(default_log_dir);
    logging::init_logger(log_dir, config.log_level)?;

    build_state(&config).await
}

/// Open the SQLite store named by `config` and wire the handlers to it
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let database = Database::new(&config.store)
        .await
        .context("Failed to open sign-in database")?;
    database
        .run_migrations()
        .await
        .context("Failed to run database migrations")?;

    let pool = Arc::new(database.pool().clone());
    let store = Arc::new(SqliteBitmapStore::new(
        pool,
        config.store.operation_timeout(),
    ));

    info!(
        database = %config.store.database_path.display(),
        timeout_ms = config.store.operation_timeout_ms,
        "Sign-in store ready"
    );
    Ok(AppState::new(store))
}
