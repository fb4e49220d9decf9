use serde::Serialize;

use super::rules::{resolve_rule_set, Minimum, RuleSet};
use super::{round_percent, Score, Unavailable};
use crate::models::day::{DayRecord, Field, FieldValue};

/// Satisfied slots out of the slots a rule set measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub satisfied: usize,
    pub total: usize,
}

pub fn tally(day: &DayRecord, rules: &RuleSet) -> Tally {
    let count = |fields: &[Field], check: fn(Option<FieldValue<'_>>) -> bool| {
        fields.iter().filter(|field| check(day.value(**field))).count()
    };

    let minimums = rules
        .minimums
        .iter()
        .filter(|minimum| meets(day, minimum))
        .count();
    let one_of = usize::from(rules.one_of.iter().any(|field| is_filled(day.value(*field))));

    Tally {
        satisfied: count(rules.must_be_true, is_true)
            + count(rules.must_be_zero, is_zero)
            + minimums
            + count(rules.non_empty, is_filled)
            + one_of,
        total: rules.total(),
    }
}

pub fn score_day(day: &DayRecord, rules: &RuleSet) -> Score {
    let Tally { satisfied, total } = tally(day, rules);
    if total == 0 {
        return Err(Unavailable::EmptyRuleSet { key: rules.key });
    }
    Ok(round_percent(satisfied as f64 / total as f64 * 100.0))
}

/// Scores a day against the rules in force on its date.
pub fn daily_completion(day: &DayRecord) -> Score {
    let rules = resolve_rule_set(day.day_date)?;
    score_day(day, rules)
}

fn is_true(value: Option<FieldValue<'_>>) -> bool {
    matches!(value, Some(FieldValue::Flag(true)))
}

fn is_zero(value: Option<FieldValue<'_>>) -> bool {
    matches!(value, Some(FieldValue::Number(n)) if n == 0.0)
}

/// NONEMPTY: text counts once trimmed, so whitespace alone is empty.
fn is_filled(value: Option<FieldValue<'_>>) -> bool {
    matches!(value, Some(FieldValue::Text(text)) if !text.trim().is_empty())
}

fn meets(day: &DayRecord, minimum: &Minimum) -> bool {
    matches!(day.value(minimum.field), Some(FieldValue::Number(n)) if n >= minimum.at_least)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::scoring::rules::find_entry;

    fn day(y: i32, m: u32, d: u32) -> DayRecord {
        DayRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn rules(key: &str) -> &'static RuleSet {
        find_entry(key).unwrap().rules
    }

    /// Flips every TRUE habit of 2021 on and meets both minimums.
    fn perfect_2021(mut record: DayRecord) -> DayRecord {
        record.med = true;
        record.med2 = true;
        record.med3 = true;
        record.tetris = true;
        record.relax = true;
        record.flaxseed = true;
        record.spirulina = true;
        record.fish_oil_or_d3 = true;
        record.water = true;
        record.drink_food = true;
        record.coffee_x2 = true;
        record.warmup = true;
        record.stretching = true;
        record.rpg = true;
        record.code = true;
        record.eng = true;
        record.de = true;
        record.fr = true;
        record.ukr = true;
        record.sleep = 7.5;
        record.fasting = 14.0;
        record.lapses = Some(0);
        record
    }

    #[test]
    fn test_untouched_2016_day_scores_zero() {
        // lapses is not a 2016 rule, so nothing is satisfied
        assert_eq!(daily_completion(&day(2016, 11, 2)), Ok(0));
    }

    #[test]
    fn test_fully_done_2016_day_scores_hundred() {
        let mut record = day(2016, 11, 2);
        record.med2 = true;
        record.med3 = true;
        record.satyr = true;
        record.meals_x4 = true;
        record.sleep = 7.0;
        record.workout = Some("run 5k".into());

        assert_eq!(daily_completion(&record), Ok(100));
    }

    #[test]
    fn test_zero_rule_counts_untouched_lapses() {
        // 2018: 27 slots, only lapses == 0 holds
        let record = day(2018, 4, 4);
        assert_eq!(tally(&record, rules("2018")), Tally { satisfied: 1, total: 27 });
        assert_eq!(daily_completion(&record), Ok(4));
    }

    #[test]
    fn test_perfect_2021_day_with_exercise_scores_hundred() {
        let mut record = perfect_2021(day(2021, 5, 10));
        record.micro_w = Some("x".into());

        assert_eq!(tally(&record, rules("2021")), Tally { satisfied: 23, total: 23 });
        assert_eq!(daily_completion(&record), Ok(100));
    }

    #[test]
    fn test_one_of_group_scores_at_most_once() {
        let mut one = perfect_2021(day(2022, 2, 2));
        one.micro_w = Some("x".into());
        let mut two = one.clone();
        two.mass = Some("y".into());
        two.cardio = Some("z".into());

        assert_eq!(daily_completion(&one), daily_completion(&two));
    }

    #[test]
    fn test_missing_exercise_costs_the_adjustment_slot() {
        let record = perfect_2021(day(2021, 5, 10));
        assert_eq!(tally(&record, rules("2021")), Tally { satisfied: 22, total: 23 });
        assert_eq!(daily_completion(&record), Ok(96));
    }

    #[test]
    fn test_blank_text_does_not_count() {
        let mut record = day(2023, 1, 1);
        record.workout = Some("   ".into());
        let blank = tally(&record, rules("2023")).satisfied;

        record.workout = Some("yoga".into());
        let filled = tally(&record, rules("2023")).satisfied;

        assert_eq!(filled, blank + 1);
    }

    #[test]
    fn test_absent_lapses_never_satisfies_zero_rule() {
        let mut record = day(2019, 9, 9);
        record.lapses = None;
        assert_eq!(tally(&record, rules("2019")).satisfied, 0);

        record.lapses = Some(1);
        assert_eq!(tally(&record, rules("2019")).satisfied, 0);
    }

    #[test]
    fn test_minimum_is_inclusive() {
        let mut record = day(2019, 9, 9);
        record.lapses = Some(1);
        record.sleep = 6.99;
        record.fasting = 12.0;
        assert_eq!(tally(&record, rules("2019")).satisfied, 1);

        record.sleep = 7.0;
        assert_eq!(tally(&record, rules("2019")).satisfied, 2);
    }

    #[test]
    fn test_2019_scores_hidden_stretching() {
        let mut record = day(2019, 3, 3);
        record.lapses = Some(3);
        record.stretching = true;
        assert_eq!(tally(&record, rules("2019")).satisfied, 1);
    }

    #[test]
    fn test_uncatalogued_date_is_unavailable() {
        let record = day(2030, 1, 1);
        assert_eq!(
            daily_completion(&record),
            Err(Unavailable::NoRuleSet { date: record.day_date })
        );
    }

    #[test]
    fn test_empty_rule_set_is_unavailable() {
        static EMPTY: RuleSet = RuleSet {
            key: "empty",
            title: "empty",
            fields: &[],
            must_be_true: &[],
            must_be_zero: &[],
            minimums: &[],
            non_empty: &[],
            one_of: &[Field::MicroW],
            one_of_counts_toward_total: false,
            labels: &[],
        };
        assert_eq!(
            score_day(&day(2021, 1, 1), &EMPTY),
            Err(Unavailable::EmptyRuleSet { key: "empty" })
        );
    }

    #[test]
    fn test_adjusted_total_counts_group_slot() {
        static ADJUSTED: RuleSet = RuleSet {
            key: "adjusted",
            title: "adjusted",
            fields: &[],
            must_be_true: &[
                Field::Med,
                Field::Med2,
                Field::Med3,
                Field::Tetris,
                Field::Relax,
                Field::Water,
            ],
            must_be_zero: &[Field::Lapses],
            minimums: &[
                Minimum { field: Field::Sleep, at_least: 7.0 },
                Minimum { field: Field::Fasting, at_least: 14.0 },
            ],
            non_empty: &[],
            one_of: &[Field::MicroW, Field::Mass, Field::Iso, Field::Cardio],
            one_of_counts_toward_total: true,
            labels: &[],
        };

        let mut record = perfect_2021(day(2021, 6, 1));
        record.iso = Some("plank".into());

        assert_eq!(tally(&record, &ADJUSTED), Tally { satisfied: 10, total: 10 });
        assert_eq!(score_day(&record, &ADJUSTED), Ok(100));
    }

    #[test]
    fn test_scores_stay_within_bounds_and_repeat() {
        let mut record = perfect_2021(day(2022, 12, 31));
        record.cardio = Some("bike".into());
        record.lapses = Some(4);

        for entry in crate::scoring::rules::CATALOG {
            let first = score_day(&record, entry.rules).unwrap();
            assert!(first <= 100);
            assert_eq!(score_day(&record, entry.rules).unwrap(), first);
        }
    }
}
