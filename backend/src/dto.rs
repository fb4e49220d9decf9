//! # Daylog: Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - Validation is expressed via `validator` derive macros
//! - Derived figures travel as a raw value (`null` when unavailable) plus a
//!   styled label

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::day::{DayRecord, Field};
use crate::models::month::MonthRecord;
use crate::scoring::format::{completion_label, counter_label, wellbeing_label};
use crate::scoring::monthly::MonthScores;
use crate::scoring::rules::{CatalogEntry, RuleSet};
use crate::scoring::{daily_completion, day_wellbeing, resolve_rule_set, StyledLabel, Unavailable};

// ============================================================================
// Common
// ============================================================================

/// Standard delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// GET /api/me
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
}

// ============================================================================
// Days
// ============================================================================

/// PUT /api/days/{date}: partial update, all fields optional
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateDayRequest {
    pub milam: Option<bool>,
    pub dream: Option<bool>,
    pub sunwalk: Option<bool>,
    pub med: Option<bool>,
    pub med2: Option<bool>,
    pub med3: Option<bool>,
    pub tetris: Option<bool>,
    pub satyr: Option<bool>,
    pub relax: Option<bool>,

    pub mirroring: Option<bool>,
    pub appreciation: Option<bool>,
    pub helpfulness: Option<bool>,
    pub small_talk: Option<bool>,

    /// Hours slept
    #[validate(range(min = 0.0, max = 24.0, message = "sleep must be 0-24 hours"))]
    pub sleep: Option<f64>,
    /// Fasting window in hours
    #[validate(range(min = 0.0, max = 99.99, message = "fasting must be 0-99.99 hours"))]
    pub fasting: Option<f64>,
    pub drink_food: Option<bool>,
    pub eat_before_leaving: Option<bool>,
    pub eat_clean: Option<bool>,
    pub meals_x4: Option<bool>,
    pub face_care: Option<bool>,
    pub flaxseed: Option<bool>,
    pub spirulina: Option<bool>,
    pub green_veggies: Option<bool>,
    pub lions_mane: Option<bool>,
    pub pickles: Option<bool>,
    pub fish_oil_or_d3: Option<bool>,
    pub water: Option<bool>,
    pub coffee_x2: Option<bool>,
    #[validate(range(min = 0, message = "lapses cannot be negative"))]
    pub lapses: Option<i16>,
    pub warmup: Option<bool>,
    pub stretching: Option<bool>,
    pub workout: Option<String>,
    pub micro_w: Option<String>,
    pub mass: Option<String>,
    pub iso: Option<String>,
    pub cardio: Option<String>,

    pub rpg: Option<bool>,
    pub code: Option<bool>,
    pub eng: Option<bool>,
    pub de: Option<bool>,
    pub fr: Option<bool>,
    pub ukr: Option<bool>,

    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub awareness: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub happiness: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub openness: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub focus: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub anger: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub fear: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub emptiness: Option<i16>,
    #[validate(range(min = 0, max = 5, message = "marks are 0-5"))]
    pub chaos: Option<i16>,

    pub dreams: Option<String>,
    pub events: Option<String>,
    pub ideas: Option<String>,
    pub comments: Option<String>,
}

/// A day with its derived figures.
#[derive(Debug, Serialize)]
pub struct DayResponse {
    #[serde(flatten)]
    pub day: DayRecord,
    pub rule_set: Option<&'static str>,
    pub completion: Option<u8>,
    pub completion_label: StyledLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<Unavailable>,
    pub wellbeing: Option<f64>,
    pub wellbeing_label: StyledLabel,
}

impl From<DayRecord> for DayResponse {
    fn from(day: DayRecord) -> Self {
        let score = daily_completion(&day);
        let wellbeing = day_wellbeing(&day);

        Self {
            rule_set: resolve_rule_set(day.day_date).ok().map(|rules| rules.key),
            completion: score.ok(),
            completion_label: completion_label(&score),
            unavailable: score.err(),
            wellbeing,
            wellbeing_label: wellbeing_label(wellbeing),
            day,
        }
    }
}

// ============================================================================
// Months
// ============================================================================

/// GET /api/months?limit=&before=
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListMonthsQuery {
    #[validate(range(min = 1, max = 120, message = "limit must be 1-120"))]
    pub limit: Option<i64>,
    /// Month key (`YYYY-MM`); only older months are listed.
    pub before: Option<String>,
}

impl ListMonthsQuery {
    pub const DEFAULT_LIMIT: i64 = 24;

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// Month row for GET /api/months
#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub comments: Option<String>,
    pub completion: Option<u8>,
    pub completion_label: StyledLabel,
    pub lapses: Option<i64>,
    pub lapses_label: StyledLabel,
    pub days: usize,
    pub scored_days: usize,
}

impl MonthSummary {
    pub fn new(month: MonthRecord, days: &[DayRecord]) -> Self {
        let scores = MonthScores::of(days);

        Self {
            month: month.month_key,
            comments: month.comments,
            completion: scores.completion.ok(),
            completion_label: completion_label(&scores.completion),
            lapses: scores.lapses.ok(),
            lapses_label: counter_label(&scores.lapses),
            days: scores.days,
            scored_days: scores.scored_days,
        }
    }
}

/// GET /api/months/{month}: summary plus every day, newest first
#[derive(Debug, Serialize)]
pub struct MonthDetailResponse {
    #[serde(flatten)]
    pub summary: MonthSummary,
    pub day_list: Vec<DayResponse>,
}

/// PUT /api/months/{month}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMonthRequest {
    #[validate(length(max = 10000, message = "Comments must be under 10000 characters"))]
    pub comments: Option<String>,
}

// ============================================================================
// Rule sets
// ============================================================================

/// Catalog entry for GET /api/rule-sets
#[derive(Debug, Serialize)]
pub struct RuleSetSummary {
    pub key: &'static str,
    pub title: &'static str,
    pub year: i32,
    pub first_month: u32,
    pub last_month: u32,
    pub total: usize,
}

impl From<&'static CatalogEntry> for RuleSetSummary {
    fn from(entry: &'static CatalogEntry) -> Self {
        Self {
            key: entry.rules.key,
            title: entry.rules.title,
            year: entry.year,
            first_month: entry.first_month,
            last_month: entry.last_month,
            total: entry.rules.total(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldColumn {
    pub field: Field,
    pub label: &'static str,
}

/// GET /api/rule-sets/{key}
#[derive(Debug, Serialize)]
pub struct RuleSetDetail {
    #[serde(flatten)]
    pub summary: RuleSetSummary,
    pub columns: Vec<FieldColumn>,
    pub rules: &'static RuleSet,
}

impl From<&'static CatalogEntry> for RuleSetDetail {
    fn from(entry: &'static CatalogEntry) -> Self {
        let rules = entry.rules;
        Self {
            summary: RuleSetSummary::from(entry),
            columns: rules
                .fields
                .iter()
                .map(|field| FieldColumn {
                    field: *field,
                    label: rules.label(*field),
                })
                .collect(),
            rules,
        }
    }
}

/// GET /api/rule-sets/{key}/days
#[derive(Debug, Serialize)]
pub struct RuleSetDaysResponse {
    pub key: &'static str,
    pub title: &'static str,
    pub days: Vec<DayResponse>,
}

// ============================================================================
// Foods
// ============================================================================

/// POST /api/foods
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFoodRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, max = 999.99))]
    pub fat: Option<f64>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub fiber: Option<f64>,
}

/// PUT /api/foods/{id}: partial update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFoodRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub fat: Option<f64>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0, max = 999.99))]
    pub fiber: Option<f64>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::scoring::rules::find_entry;

    #[test]
    fn test_marks_outside_scale_are_rejected() {
        let request = UpdateDayRequest {
            awareness: Some(6),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdateDayRequest {
            awareness: Some(5),
            chaos: Some(0),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_month_page_size_is_bounded() {
        assert_eq!(ListMonthsQuery::default().limit(), 24);
        assert!(ListMonthsQuery { limit: Some(0), before: None }.validate().is_err());
        assert!(ListMonthsQuery { limit: Some(121), before: None }.validate().is_err());
        assert!(ListMonthsQuery { limit: Some(12), before: None }.validate().is_ok());
    }

    #[test]
    fn test_unknown_day_fields_are_rejected() {
        let parsed: Result<UpdateDayRequest, _> =
            serde_json::from_value(serde_json::json!({ "meditation": true }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_day_response_carries_figures_and_labels() {
        let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2016, 11, 3).unwrap());
        day.med2 = true;
        day.med3 = true;
        day.satyr = true;
        for mark in [
            &mut day.awareness,
            &mut day.happiness,
            &mut day.openness,
            &mut day.focus,
        ] {
            *mark = Some(3);
        }
        for mark in [&mut day.anger, &mut day.fear, &mut day.emptiness, &mut day.chaos] {
            *mark = Some(1);
        }

        let json = serde_json::to_value(DayResponse::from(day)).unwrap();
        assert_eq!(json["rule_set"], "2016");
        assert_eq!(json["completion"], 50);
        assert_eq!(json["completion_label"]["text"], "50 %");
        assert_eq!(json["wellbeing"], 2.0);
        assert_eq!(json["wellbeing_label"]["color"], "gold");
        assert_eq!(json["day_date"], "2016-11-03");
        assert!(json.get("unavailable").is_none());
    }

    #[test]
    fn test_day_response_outside_catalog() {
        let day = DayRecord::new(NaiveDate::from_ymd_opt(2031, 1, 1).unwrap());
        let json = serde_json::to_value(DayResponse::from(day)).unwrap();
        assert!(json["completion"].is_null());
        assert_eq!(json["completion_label"]["text"], "-");
        assert_eq!(json["unavailable"]["reason"], "no_rule_set");
    }

    #[test]
    fn test_rule_set_detail_uses_period_labels() {
        let detail = RuleSetDetail::from(find_entry("2016").unwrap());
        assert_eq!(detail.columns[0].label, "DoNothing");
        assert_eq!(detail.summary.total, 6);
    }
}
