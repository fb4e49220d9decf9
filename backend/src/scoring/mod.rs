//! Completion and well-being scoring.
//!
//! Everything here is a pure function of the records passed in. Missing
//! data never fails a request: it surfaces as [`Unavailable`] (completion,
//! counters) or `None` (well-being), which the formatters render as `"-"`.

pub mod daily;
pub mod format;
pub mod monthly;
pub mod rules;
pub mod wellbeing;

use chrono::NaiveDate;
use serde::Serialize;

pub use daily::{daily_completion, score_day, Tally};
pub use format::{format_completion, format_composite, format_wellbeing, StyledLabel};
pub use monthly::{month_completion, month_lapses, MonthScores};
pub use rules::{resolve_rule_set, RuleSet};
pub use wellbeing::{composite, day_wellbeing, WellBeingTier};

/// Why a completion figure or counter could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    #[error("no rule set covers {date}")]
    NoRuleSet { date: NaiveDate },

    #[error("rule set {key} has nothing to score")]
    EmptyRuleSet { key: &'static str },

    #[error("month has no scoreable days")]
    EmptyMonth,

    #[error("lapse counter missing on {date}")]
    MissingCounter { date: NaiveDate },
}

/// Completion percentage in `0..=100`.
pub type Score = Result<u8, Unavailable>;

/// Rounds half to even, the way the percentages were always reported.
pub(crate) fn round_percent(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percent_ties_to_even() {
        assert_eq!(round_percent(12.5), 12);
        assert_eq!(round_percent(13.5), 14);
        assert_eq!(round_percent(64.9), 65);
        assert_eq!(round_percent(100.0), 100);
    }

    #[test]
    fn test_unavailable_serializes_with_reason_tag() {
        let json = serde_json::to_value(Unavailable::EmptyMonth).unwrap();
        assert_eq!(json, serde_json::json!({ "reason": "empty_month" }));
    }
}
