use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthRecord {
    pub month_key: String,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Calendar month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct MonthKeyError(String);

impl MonthKey {
    /// Years a key can spell with four digits.
    pub const YEARS: RangeInclusive<i32> = 0..=9999;

    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !Self::YEARS.contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month of `date`, or `None` outside [`MonthKey::YEARS`].
    pub fn try_of(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    /// Unchecked: years outside [`MonthKey::YEARS`] do not survive a text
    /// round trip. Request input goes through [`MonthKey::try_of`].
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthKeyError(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(err)?;
        let digits =
            |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(err());
        }
        let year = year.parse().map_err(|_| err())?;
        let month = month.parse().map_err(|_| err())?;
        MonthKey::new(year, month).ok_or_else(err)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let key: MonthKey = "2017-08".parse().unwrap();
        assert_eq!(key.year(), 2017);
        assert_eq!(key.month(), 8);
        assert_eq!(key.to_string(), "2017-08");
    }

    #[test]
    fn test_rejects_malformed_keys() {
        for raw in ["2017-8", "2017-13", "17-08", "2017/08", "", "abcd-ef"] {
            assert!(raw.parse::<MonthKey>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_rejects_signs_and_wide_years() {
        for raw in ["+201-08", "-201-08", "2017-+8", "10000-01", " 201-08"] {
            assert!(raw.parse::<MonthKey>().is_err(), "{raw} should be rejected");
        }
        assert!(MonthKey::new(10000, 1).is_none());
        assert!(MonthKey::new(-1, 6).is_none());
    }

    #[test]
    fn test_try_of_round_trips_through_text() {
        let date = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        let key = MonthKey::try_of(date).unwrap();
        assert_eq!(key.to_string().parse::<MonthKey>().unwrap(), key);

        assert!(MonthKey::try_of(NaiveDate::from_ymd_opt(10000, 1, 1).unwrap()).is_none());
        assert!(MonthKey::try_of(NaiveDate::from_ymd_opt(-1, 6, 1).unwrap()).is_none());
    }

    #[test]
    fn test_contains_only_dates_of_that_month() {
        let key = MonthKey::new(2023, 2).unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2022, 2, 1).unwrap()));
        assert_eq!(key.first_day(), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
    }

    #[test]
    fn test_serializes_as_string() {
        let key = MonthKey::new(2021, 12).unwrap();
        assert_eq!(serde_json::to_value(key).unwrap(), "2021-12");
        let back: MonthKey = serde_json::from_value(serde_json::json!("2021-12")).unwrap();
        assert_eq!(back, key);
    }
}
