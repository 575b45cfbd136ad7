use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::{DomainError, UserId};

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// A calendar month a sign-in bitmap belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignInMonth {
    year: i32,
    month: u32,
}

impl SignInMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidArgument(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DomainError::InvalidArgument(format!(
                "Year must have four digits, got {}",
                year
            )));
        }

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in this month (28..=31)
    pub fn days(&self) -> u32 {
        let first_day_next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };

        // Year is bounded to 1000..=9999, so both dates always exist
        first_day_next_month
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// Calendar date for a day of this month
    pub fn date(&self, day: u32) -> Result<SignInDate, DomainError> {
        SignInDate::new(self.year, self.month, day)
    }
}

impl fmt::Display for SignInMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for SignInMonth {
    type Err = DomainError;

    /// Parses `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidArgument(format!("Invalid month '{}', expected YYYY-MM", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

/// The caller's local calendar day a sign-in is recorded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignInDate {
    month: SignInMonth,
    day: u32,
}

impl SignInDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        let month = SignInMonth::new(year, month)?;

        if !(1..=31).contains(&day) {
            return Err(DomainError::InvalidArgument(format!(
                "Day of month must be between 1 and 31, got {}",
                day
            )));
        }
        if day > month.days() {
            return Err(DomainError::InvalidArgument(format!(
                "{} has only {} days, got day {}",
                month,
                month.days(),
                day
            )));
        }

        Ok(Self { month, day })
    }

    pub fn from_naive(date: NaiveDate) -> Result<Self, DomainError> {
        Self::new(date.year(), date.month(), date.day())
    }

    pub fn month(&self) -> SignInMonth {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Zero-based bit offset of this day inside the month bitmap
    pub fn day_index(&self) -> u32 {
        self.day - 1
    }
}

impl fmt::Display for SignInDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.month, self.day)
    }
}

impl FromStr for SignInDate {
    type Err = DomainError;

    /// Parses `YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
            DomainError::InvalidArgument(format!("Invalid date '{}': {}", s, e))
        })?;
        Self::from_naive(date)
    }
}

/// Key of one user's bitmap for one month.
///
/// Format: `sign:userId{<user id>}:date{<yyyymm>}`. The date segment has a fixed
/// width at the end of the key, so two different (user, month) pairs never map to
/// the same key whatever characters the user id contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn derive(user_id: &UserId, month: &SignInMonth) -> Self {
        Self(format!(
            "sign:userId{{{}}}:date{{{:04}{:02}}}",
            user_id.as_str(),
            month.year(),
            month.month()
        ))
    }

    /// Validate raw parts and derive the key
    pub fn from_parts(user_id: &str, year: i32, month: u32) -> Result<Self, DomainError> {
        let user_id = UserId::parse(user_id)?;
        let month = SignInMonth::new(year, month)?;
        Ok(Self::derive(&user_id, &month))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
