use log::info;

use crate::application::dtos::StreakSummaryDto;
use signin_domain::shared::{DomainError, UserId};
use signin_domain::sign_in::{SignInDate, StreakCounter};

pub async fn get_current_streak(
    counter: &StreakCounter,
    user_id: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<u32, DomainError> {
    let user_id = UserId::parse(user_id)?;
    let date = SignInDate::new(year, month, day)?;

    let streak = counter.current_streak(&user_id, &date).await?;

    info!(
        "[streak] get_current_streak user_id={} date={} current={}",
        user_id, date, streak
    );
    Ok(streak)
}

pub async fn get_streak_summary(
    counter: &StreakCounter,
    user_id: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<StreakSummaryDto, DomainError> {
    let user_id = UserId::parse(user_id)?;
    let date = SignInDate::new(year, month, day)?;

    // One fetch covers all three numbers
    let bits = counter.bits_through(&user_id, &date).await?;

    let dto = StreakSummaryDto {
        user_id: user_id.to_string(),
        date: date.to_string(),
        current_streak: bits.current_streak(),
        signed_in_today: bits.is_signed_in(date.day()),
        signed_in_days_this_month: bits.signed_in_days(),
    };

    info!(
        "[streak] get_streak_summary user_id={} date={} current={} today={} month_total={}",
        dto.user_id,
        dto.date,
        dto.current_streak,
        dto.signed_in_today,
        dto.signed_in_days_this_month
    );
    Ok(dto)
}
