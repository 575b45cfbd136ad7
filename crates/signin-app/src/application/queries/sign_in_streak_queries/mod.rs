use std::sync::Arc;

use crate::application::dtos::{SignInCalendarDto, StreakSummaryDto};
use signin_domain::shared::DomainError;
use signin_domain::sign_in::{SignInBitmapStore, StreakCounter};

mod calendar;
mod streak;


pub struct SignInStreakQueries {
    counter: StreakCounter,
}

impl SignInStreakQueries {
    pub fn new(store: Arc<dyn SignInBitmapStore>) -> Self {
        Self {
            counter: StreakCounter::new(store),
        }
    }

    /// Current streak for a user as of the given day
    pub async fn get_current_streak(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<u32, DomainError> {
        streak::get_current_streak(&self.counter, user_id, year, month, day).await
    }

    /// Streak plus today's status and the month's count so far
    pub async fn get_streak_summary(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<StreakSummaryDto, DomainError> {
        streak::get_streak_summary(&self.counter, user_id, year, month, day).await
    }

    /// Sign-in calendar for a specific month
    pub async fn get_calendar(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<SignInCalendarDto, DomainError> {
        calendar::get_calendar(&self.counter, user_id, year, month).await
    }
}
