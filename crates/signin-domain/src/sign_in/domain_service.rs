use log::{debug, info};
use std::sync::Arc;

use crate::shared::{DomainError, UserId};
use crate::sign_in::bitmap::MonthBits;
use crate::sign_in::repository::SignInBitmapStore;
use crate::sign_in::value_objects::{SignInDate, SignInMonth, StorageKey};

/// Writes sign-in days into the monthly bitmap
pub struct SignInEncoder {
    store: Arc<dyn SignInBitmapStore>,
}

impl SignInEncoder {
    pub fn new(store: Arc<dyn SignInBitmapStore>) -> Self {
        Self { store }
    }

    /// Mark `date` as a sign-in day for `user_id`. Setting the same day twice is a no-op.
    pub async fn record_sign_in(
        &self,
        user_id: &UserId,
        date: &SignInDate,
    ) -> Result<(), DomainError> {
        let key = StorageKey::derive(user_id, &date.month());
        let offset = date.day_index();

        self.store.set_bit(key.as_str(), offset, true).await?;

        info!(
            "[sign_in] recorded user_id={} date={} key={} offset={}",
            user_id, date, key, offset
        );
        Ok(())
    }
}

/// Reads the monthly bitmap back and derives streaks from it
pub struct StreakCounter {
    store: Arc<dyn SignInBitmapStore>,
}

impl StreakCounter {
    pub fn new(store: Arc<dyn SignInBitmapStore>) -> Self {
        Self { store }
    }

    /// Consecutive sign-in days ending on `date`, never looking past day 1 of its month
    pub async fn current_streak(
        &self,
        user_id: &UserId,
        date: &SignInDate,
    ) -> Result<u32, DomainError> {
        let bits = self.bits_through(user_id, date).await?;
        let streak = bits.current_streak();

        debug!(
            "[streak] current_streak user_id={} date={} bits={:#b} streak={}",
            user_id,
            date,
            bits.bits(),
            streak
        );
        Ok(streak)
    }

    /// Days 1 through `date` of the month containing `date`
    pub async fn bits_through(
        &self,
        user_id: &UserId,
        date: &SignInDate,
    ) -> Result<MonthBits, DomainError> {
        self.fetch(user_id, &date.month(), date.day()).await
    }

    /// Every day of `month`
    pub async fn whole_month(
        &self,
        user_id: &UserId,
        month: &SignInMonth,
    ) -> Result<MonthBits, DomainError> {
        self.fetch(user_id, month, month.days()).await
    }

    async fn fetch(
        &self,
        user_id: &UserId,
        month: &SignInMonth,
        width: u32,
    ) -> Result<MonthBits, DomainError> {
        let key = StorageKey::derive(user_id, month);
        let value = self.store.get_unsigned_bits(key.as_str(), width).await?;
        MonthBits::new(value, width)
    }
}
