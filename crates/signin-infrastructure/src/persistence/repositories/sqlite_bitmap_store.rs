use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use signin_domain::shared::DomainError;
use signin_domain::sign_in::{low_bits_mask, validate_offset, validate_width, SignInBitmapStore};

use crate::persistence::ResultExt;

/// Bitmaps persisted in SQLite, one INTEGER word per key
pub struct SqliteBitmapStore {
    pool: Arc<SqlitePool>,
    operation_timeout: Duration,
}

impl SqliteBitmapStore {
    pub fn new(pool: Arc<SqlitePool>, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn with_timeout<T, F>(&self, operation: &str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result.to_storage_err().inspect_err(|e| {
                warn!("[store] {} failed: {}", operation, e);
            }),
            Err(_) => {
                warn!(
                    "[store] {} timed out after {}ms",
                    operation,
                    self.operation_timeout.as_millis()
                );
                Err(DomainError::StorageUnavailable(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.operation_timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl SignInBitmapStore for SqliteBitmapStore {
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), DomainError> {
        validate_offset(offset)?;
        let mask = 1i64 << offset;

        // Single upsert, so concurrent writers to one key never lose a bit
        let query = if value {
            r#"
            INSERT INTO sign_in_bitmaps (key, bits, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                bits = bits | ?2,
                updated_at = ?3
            "#
        } else {
            r#"
            INSERT INTO sign_in_bitmaps (key, bits, updated_at)
            VALUES (?1, 0, ?3)
            ON CONFLICT(key) DO UPDATE SET
                bits = bits & ~?2,
                updated_at = ?3
            "#
        };

        self.with_timeout(
            "Set bit",
            sqlx::query(query)
                .bind(key)
                .bind(mask)
                .bind(Utc::now())
                .execute(&*self.pool),
        )
        .await?;

        debug!("[store] set_bit key={} offset={} value={}", key, offset, value);
        Ok(())
    }

    async fn get_unsigned_bits(&self, key: &str, width: u32) -> Result<u64, DomainError> {
        validate_width(width)?;

        let query = "SELECT bits FROM sign_in_bitmaps WHERE key = ?1";
        let stored: Option<i64> = self
            .with_timeout(
                "Get bits",
                sqlx::query_scalar(query).bind(key).fetch_optional(&*self.pool),
            )
            .await?;

        let bits = stored.map(|b| b as u64 & low_bits_mask(width)).unwrap_or(0);
        debug!(
            "[store] get_unsigned_bits key={} width={} found={} bits={:#b}",
            key,
            width,
            stored.is_some(),
            bits
        );
        Ok(bits)
    }
}
