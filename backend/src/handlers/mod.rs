pub mod auth;
pub mod days;
pub mod foods;
pub mod health;
pub mod months;
pub mod rule_sets;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::month::MonthKey;

/// Parses a `YYYY-MM-DD` path segment. The year must fit a month key.
pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    let invalid = || AppError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD"));
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())?;
    MonthKey::try_of(date).ok_or_else(invalid)?;
    Ok(date)
}

pub(crate) fn parse_month(raw: &str) -> AppResult<MonthKey> {
    raw.parse::<MonthKey>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("2021-03-04").is_ok());
        assert!(matches!(parse_date("04.03.2021"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("2021-02-30"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_date_rejects_years_without_a_month_key() {
        for raw in ["+10000-01-01", "-0001-06-01"] {
            assert!(matches!(parse_date(raw), Err(AppError::Validation(_))), "{raw}");
        }
        assert!(parse_date("0001-06-01").is_ok());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2021-03").unwrap().to_string(), "2021-03");
        assert!(matches!(parse_month("2021-13"), Err(AppError::Validation(_))));
    }
}
