use std::sync::Arc;
use std::time::Duration;

use signin_domain::shared::DomainError;
use signin_domain::sign_in::SignInBitmapStore;
use signin_infrastructure::config::StoreConfig;
use signin_infrastructure::persistence::repositories::SqliteBitmapStore;
use signin_infrastructure::persistence::Database;

mod test_helpers;

const KEY: &str = "sign:userId{666}:date{202308}";

#[tokio::test]
async fn sqlite_store_missing_key_reads_zero() {
    let (_pool, store) = test_helpers::setup_store().await;

    let bits = store.get_unsigned_bits(KEY, 31).await.expect("Get bits");
    assert_eq!(bits, 0);
}

#[tokio::test]
async fn sqlite_store_set_then_get() {
    let (_pool, store) = test_helpers::setup_store().await;

    for offset in [0, 1, 2, 4, 30] {
        store.set_bit(KEY, offset, true).await.expect("Set bit");
    }

    let bits = store.get_unsigned_bits(KEY, 31).await.expect("Get bits");
    assert_eq!(bits, 0b1 | 0b10 | 0b100 | 0b1_0000 | (1 << 30));
}

#[tokio::test]
async fn sqlite_store_set_is_idempotent() {
    let (pool, store) = test_helpers::setup_store().await;

    store.set_bit(KEY, 7, true).await.expect("First set");
    let first: i64 = sqlx::query_scalar("SELECT bits FROM sign_in_bitmaps WHERE key = ?1")
        .bind(KEY)
        .fetch_one(&*pool)
        .await
        .expect("Read raw bits");

    store.set_bit(KEY, 7, true).await.expect("Second set");
    let second: i64 = sqlx::query_scalar("SELECT bits FROM sign_in_bitmaps WHERE key = ?1")
        .bind(KEY)
        .fetch_one(&*pool)
        .await
        .expect("Read raw bits");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sign_in_bitmaps")
        .fetch_one(&*pool)
        .await
        .expect("Count rows");

    assert_eq!(first, 1 << 7);
    assert_eq!(first, second);
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn sqlite_store_clear_bit() {
    let (_pool, store) = test_helpers::setup_store().await;

    store.set_bit(KEY, 0, true).await.expect("Set bit 0");
    store.set_bit(KEY, 3, true).await.expect("Set bit 3");
    store.set_bit(KEY, 0, false).await.expect("Clear bit 0");

    assert_eq!(store.get_unsigned_bits(KEY, 4).await.unwrap(), 0b1000);
}

#[tokio::test]
async fn sqlite_store_clear_on_missing_key_creates_zero_value() {
    let (pool, store) = test_helpers::setup_store().await;

    store.set_bit(KEY, 5, false).await.expect("Clear bit");

    let bits: i64 = sqlx::query_scalar("SELECT bits FROM sign_in_bitmaps WHERE key = ?1")
        .bind(KEY)
        .fetch_one(&*pool)
        .await
        .expect("Row created");
    assert_eq!(bits, 0);
}

#[tokio::test]
async fn sqlite_store_width_masks_higher_bits() {
    let (_pool, store) = test_helpers::setup_store().await;

    store.set_bit(KEY, 0, true).await.unwrap();
    store.set_bit(KEY, 20, true).await.unwrap();

    assert_eq!(store.get_unsigned_bits(KEY, 20).await.unwrap(), 1);
    assert_eq!(store.get_unsigned_bits(KEY, 21).await.unwrap(), 1 | (1 << 20));
}

#[tokio::test]
async fn sqlite_store_highest_offset_round_trips() {
    let (_pool, store) = test_helpers::setup_store().await;

    store.set_bit(KEY, 62, true).await.unwrap();
    assert_eq!(store.get_unsigned_bits(KEY, 63).await.unwrap(), 1 << 62);
}

#[tokio::test]
async fn sqlite_store_rejects_out_of_range_arguments() {
    let (_pool, store) = test_helpers::setup_store().await;

    assert!(matches!(
        store.set_bit(KEY, 63, true).await,
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.get_unsigned_bits(KEY, 0).await,
        Err(DomainError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn sqlite_store_concurrent_sets_keep_every_bit() {
    let (_pool, store) = test_helpers::setup_store().await;
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for offset in 0..31u32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.set_bit(KEY, offset, true).await
        }));
    }
    for handle in handles {
        handle.await.expect("Join").expect("Set bit");
    }

    assert_eq!(
        store.get_unsigned_bits(KEY, 31).await.unwrap(),
        (1u64 << 31) - 1
    );
}

#[tokio::test]
async fn sqlite_store_closed_pool_is_storage_unavailable() {
    let (pool, store) = test_helpers::setup_store().await;
    pool.close().await;

    assert!(matches!(
        store.set_bit(KEY, 0, true).await,
        Err(DomainError::StorageUnavailable(_))
    ));
    assert!(matches!(
        store.get_unsigned_bits(KEY, 31).await,
        Err(DomainError::StorageUnavailable(_))
    ));
}

#[tokio::test]
async fn sqlite_store_blocked_writer_times_out() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    // busy_timeout outlasts the store deadline
    let config = StoreConfig {
        database_path: dir.path().join("signin.db"),
        max_connections: 2,
        operation_timeout_ms: 10_000,
    };
    let db = Database::new(&config).await.expect("Open database");
    db.run_migrations().await.expect("Run migrations");
    let pool = Arc::new(db.pool().clone());

    let mut lock_holder = pool.acquire().await.expect("Acquire connection");
    sqlx::query("BEGIN IMMEDIATE")
        .execute(&mut *lock_holder)
        .await
        .expect("Take write lock");

    let store = SqliteBitmapStore::new(pool.clone(), Duration::from_millis(200));
    let result = store.set_bit(KEY, 0, true).await;

    match result {
        Err(DomainError::StorageUnavailable(message)) => {
            assert!(message.contains("timed out"), "unexpected message: {}", message);
        }
        other => panic!("Expected StorageUnavailable timeout, got {:?}", other),
    }

    sqlx::query("ROLLBACK")
        .execute(&mut *lock_holder)
        .await
        .expect("Release write lock");
    drop(lock_holder);

    let recovered = SqliteBitmapStore::new(pool, test_helpers::TEST_TIMEOUT);
    recovered.set_bit(KEY, 1, true).await.expect("Set bit after lock released");
    assert_eq!(recovered.get_unsigned_bits(KEY, 2).await.unwrap() & 0b10, 0b10);
}

#[tokio::test]
async fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let config = StoreConfig {
        database_path: dir.path().join("data").join("signin.db"),
        max_connections: 2,
        operation_timeout_ms: 5_000,
    };

    {
        let db = Database::new(&config).await.expect("Open database");
        db.run_migrations().await.expect("Run migrations");
        let store = SqliteBitmapStore::new(Arc::new(db.pool().clone()), config.operation_timeout());
        store.set_bit(KEY, 9, true).await.expect("Set bit");
        db.pool().close().await;
    }

    let db = Database::new(&config).await.expect("Reopen database");
    db.run_migrations().await.expect("Migrations are idempotent");
    let store = SqliteBitmapStore::new(Arc::new(db.pool().clone()), config.operation_timeout());

    assert_eq!(store.get_unsigned_bits(KEY, 10).await.unwrap(), 1 << 9);
}
