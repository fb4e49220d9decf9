use super::daily::daily_completion;
use super::{round_percent, Score, Unavailable};
use crate::models::day::DayRecord;

/// Unweighted mean of the scoreable daily percentages.
///
/// Unavailable days are left out of both the sum and the count.
pub fn mean_completion<I>(scores: I) -> Score
where
    I: IntoIterator<Item = Score>,
{
    let (sum, count) = scores
        .into_iter()
        .filter_map(Result::ok)
        .fold((0u32, 0u32), |(sum, count), pct| (sum + u32::from(pct), count + 1));

    if count == 0 {
        return Err(Unavailable::EmptyMonth);
    }
    Ok(round_percent(f64::from(sum) / f64::from(count)))
}

pub fn month_completion<'a, I>(days: I) -> Score
where
    I: IntoIterator<Item = &'a DayRecord>,
{
    mean_completion(days.into_iter().map(daily_completion))
}

/// Sum of the per-day lapse counters. One missing counter makes the whole
/// month's figure unavailable rather than silently low.
pub fn month_lapses<'a, I>(days: I) -> Result<i64, Unavailable>
where
    I: IntoIterator<Item = &'a DayRecord>,
{
    days.into_iter().try_fold(0i64, |sum, day| match day.lapses {
        Some(lapses) => Ok(sum + i64::from(lapses)),
        None => Err(Unavailable::MissingCounter { date: day.day_date }),
    })
}

/// Derived figures for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthScores {
    pub completion: Score,
    pub lapses: Result<i64, Unavailable>,
    pub days: usize,
    pub scored_days: usize,
}

impl MonthScores {
    pub fn of(days: &[DayRecord]) -> Self {
        let scores: Vec<Score> = days.iter().map(daily_completion).collect();
        let scored_days = scores.iter().filter(|score| score.is_ok()).count();

        Self {
            completion: mean_completion(scores),
            lapses: month_lapses(days),
            days: days.len(),
            scored_days,
        }
    }
}
