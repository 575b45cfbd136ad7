mod sign_in_streak_queries;

pub use sign_in_streak_queries::SignInStreakQueries;
