use std::sync::Arc;
use std::time::Duration;

use signin_infrastructure::persistence::repositories::SqliteBitmapStore;
use signin_infrastructure::persistence::Database;
use sqlx::SqlitePool;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Migrated in-memory database
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let db = Database::in_memory().await.expect("Open in-memory database");
    db.run_migrations().await.expect("Run migrations");
    Arc::new(db.pool().clone())
}

pub async fn setup_store() -> (Arc<SqlitePool>, SqliteBitmapStore) {
    let pool = setup_in_memory_db().await;
    let store = SqliteBitmapStore::new(pool.clone(), TEST_TIMEOUT);
    (pool, store)
}
