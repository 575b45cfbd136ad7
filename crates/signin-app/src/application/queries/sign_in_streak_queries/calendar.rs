use log::{info, warn};

use crate::application::dtos::{MonthStatsDto, SignInCalendarDto, SignInDayDto};
use signin_domain::shared::{DomainError, UserId};
use signin_domain::sign_in::{SignInMonth, StreakCounter};

/// Get sign-in calendar for a specific month
pub async fn get_calendar(
    counter: &StreakCounter,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<SignInCalendarDto, DomainError> {
    let user_id = UserId::parse(user_id)?;
    let sign_in_month = SignInMonth::new(year, month)?;

    let bits = counter.whole_month(&user_id, &sign_in_month).await?;

    if bits.signed_in_days() == 0 {
        warn!(
            "[streak] calendar empty user_id={} month={}",
            user_id, sign_in_month
        );
    }

    let mut days = Vec::with_capacity(bits.width() as usize);
    for (day, signed_in) in (1..).zip(bits.days()) {
        days.push(SignInDayDto {
            date: sign_in_month.date(day)?.to_string(),
            signed_in,
        });
    }

    let total_days = bits.width();
    let signed_in_days = bits.signed_in_days();
    let sign_in_rate = (signed_in_days as f64 / total_days as f64) * 100.0;

    let dto = SignInCalendarDto {
        user_id: user_id.to_string(),
        year,
        month,
        days,
        month_stats: MonthStatsDto {
            total_days,
            signed_in_days,
            sign_in_rate,
        },
    };

    info!(
        "[streak] calendar result user_id={} month={} signed_days={} rate={:.2}%",
        dto.user_id, sign_in_month, dto.month_stats.signed_in_days, dto.month_stats.sign_in_rate
    );
    Ok(dto)
}
