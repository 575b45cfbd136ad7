use std::sync::Arc;

use signin_domain::shared::UserId;
use signin_domain::sign_in::{SignInDate, SignInEncoder, SignInMonth, StreakCounter};

mod test_helpers;

fn date(year: i32, month: u32, day: u32) -> SignInDate {
    SignInDate::new(year, month, day).expect("Valid date")
}

#[tokio::test]
async fn e2e_streak_over_sqlite_store() {
    let (_pool, store) = test_helpers::setup_store().await;
    let store = Arc::new(store);
    let encoder = SignInEncoder::new(store.clone());
    let counter = StreakCounter::new(store);
    let user = UserId::parse("666").unwrap();

    for day in [1, 2, 3, 5] {
        encoder
            .record_sign_in(&user, &date(2023, 8, day))
            .await
            .expect("Record sign-in");
    }

    assert_eq!(counter.current_streak(&user, &date(2023, 8, 5)).await.unwrap(), 1);
    assert_eq!(counter.current_streak(&user, &date(2023, 8, 3)).await.unwrap(), 3);
    assert_eq!(counter.current_streak(&user, &date(2023, 8, 4)).await.unwrap(), 0);
}

#[tokio::test]
async fn e2e_month_boundary_resets_streak() {
    let (_pool, store) = test_helpers::setup_store().await;
    let store = Arc::new(store);
    let encoder = SignInEncoder::new(store.clone());
    let counter = StreakCounter::new(store);
    let user = UserId::parse("666").unwrap();

    for day in 1..=31 {
        encoder
            .record_sign_in(&user, &date(2023, 12, day))
            .await
            .expect("Record December");
    }

    let new_year = date(2024, 1, 1);
    assert_eq!(counter.current_streak(&user, &new_year).await.unwrap(), 0);

    encoder.record_sign_in(&user, &new_year).await.unwrap();
    assert_eq!(counter.current_streak(&user, &new_year).await.unwrap(), 1);

    let december = SignInMonth::new(2023, 12).unwrap();
    let bits = counter.whole_month(&user, &december).await.unwrap();
    assert_eq!(bits.signed_in_days(), 31);
    assert_eq!(bits.current_streak(), 31);
}
