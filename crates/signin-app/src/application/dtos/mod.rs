use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSummaryDto {
    pub user_id: String,
    /// YYYY-MM-DD the streak ends on
    pub date: String,
    pub current_streak: u32,
    pub signed_in_today: bool,
    /// Days signed in from day 1 through `date`
    pub signed_in_days_this_month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInDayDto {
    pub date: String,
    pub signed_in: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub signed_in_days: u32,
    /// Percentage of the month's days with a sign-in
    pub sign_in_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInCalendarDto {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<SignInDayDto>,
    pub month_stats: MonthStatsDto,
}
