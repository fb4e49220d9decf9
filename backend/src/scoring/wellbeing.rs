use serde::Serialize;

use crate::models::day::DayRecord;

/// Mean of the positive marks minus mean of the negative marks.
///
/// Returns `None` unless all eight marks were recorded; a partial figure
/// would be misleading.
pub fn composite(positive: [Option<i16>; 4], negative: [Option<i16>; 4]) -> Option<f64> {
    Some(mean(positive)? - mean(negative)?)
}

pub fn day_wellbeing(day: &DayRecord) -> Option<f64> {
    composite(day.positive_marks(), day.negative_marks())
}

fn mean(marks: [Option<i16>; 4]) -> Option<f64> {
    let mut sum = 0.0;
    for mark in marks {
        sum += f64::from(mark?);
    }
    Some(sum / marks.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WellBeingTier {
    Lowest,
    Low,
    Mid,
    High,
    Highest,
}

impl WellBeingTier {
    pub fn of(value: f64) -> Self {
        if value < 1.1 {
            Self::Lowest
        } else if value < 2.1 {
            Self::Low
        } else if value < 3.1 {
            Self::Mid
        } else if value < 4.1 {
            Self::High
        } else {
            Self::Highest
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Lowest => "red",
            Self::Low => "gold",
            Self::Mid => "deepskyblue",
            Self::High => "blueviolet",
            Self::Highest => "white",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_of_calm_good_day() {
        let value = composite([Some(4); 4], [Some(0); 4]).unwrap();
        assert_eq!(value, 4.0);
        assert_eq!(WellBeingTier::of(value), WellBeingTier::High);
    }

    #[test]
    fn test_composite_can_go_negative() {
        let value = composite(
            [Some(1), Some(0), Some(2), Some(1)],
            [Some(5), Some(4), Some(3), Some(4)],
        )
        .unwrap();
        assert_eq!(value, -3.0);
        assert_eq!(WellBeingTier::of(value), WellBeingTier::Lowest);
    }

    #[test]
    fn test_any_missing_mark_is_not_applicable() {
        for i in 0..8 {
            let mut marks = [Some(3); 8];
            marks[i] = None;
            let positive = [marks[0], marks[1], marks[2], marks[3]];
            let negative = [marks[4], marks[5], marks[6], marks[7]];
            assert_eq!(composite(positive, negative), None, "mark {i} missing");
        }
    }

    #[test]
    fn test_tier_boundaries_are_half_open() {
        assert_eq!(WellBeingTier::of(1.0), WellBeingTier::Lowest);
        assert_eq!(WellBeingTier::of(1.1), WellBeingTier::Low);
        assert_eq!(WellBeingTier::of(2.1), WellBeingTier::Mid);
        assert_eq!(WellBeingTier::of(3.1), WellBeingTier::High);
        assert_eq!(WellBeingTier::of(4.1), WellBeingTier::Highest);
        assert_eq!(WellBeingTier::Highest.color(), "white");
    }

    #[test]
    fn test_day_without_marks_is_not_applicable() {
        let day = DayRecord::new(chrono::NaiveDate::from_ymd_opt(2023, 5, 5).unwrap());
        assert_eq!(day_wellbeing(&day), None);
    }
}
