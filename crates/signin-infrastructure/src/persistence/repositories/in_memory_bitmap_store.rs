use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use signin_domain::shared::DomainError;
use signin_domain::sign_in::{low_bits_mask, validate_offset, validate_width, SignInBitmapStore};

/// Process-local bitmap store for tests and throwaway runs
#[derive(Default)]
pub struct InMemoryBitmapStore {
    values: RwLock<HashMap<String, u64>>,
}

impl InMemoryBitmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored word for `key`, `None` if it was never written
    pub async fn raw_value(&self, key: &str) -> Option<u64> {
        self.values.read().await.get(key).copied()
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl SignInBitmapStore for InMemoryBitmapStore {
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), DomainError> {
        validate_offset(offset)?;

        let mut values = self.values.write().await;
        let word = values.entry(key.to_string()).or_insert(0);
        if value {
            *word |= 1 << offset;
        } else {
            *word &= !(1 << offset);
        }
        Ok(())
    }

    async fn get_unsigned_bits(&self, key: &str, width: u32) -> Result<u64, DomainError> {
        validate_width(width)?;

        let values = self.values.read().await;
        Ok(values.get(key).copied().unwrap_or(0) & low_bits_mask(width))
    }
}
