use std::ops::RangeInclusive;

use serde::Serialize;

use super::wellbeing::WellBeingTier;
use super::{Score, Unavailable};

/// Text plus the colour it should be shown in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledLabel {
    pub text: String,
    pub color: Option<&'static str>,
}

impl StyledLabel {
    /// Placeholder for figures that could not be computed.
    pub fn missing() -> Self {
        Self {
            text: "-".to_string(),
            color: None,
        }
    }
}

/// Colours spread in ascending order over `0..=100`.
///
/// With `n` colours each range is `100 / n` wide; the last one absorbs the
/// remainder up to 100.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    colors: &'static [&'static str],
}

pub const COMPLETION_SCALE: ColorScale =
    ColorScale::new(&["#ff0000", "#ffa700", "#2cba00", "#7fff00"]);

pub const COUNTER_SCALE: ColorScale = ColorScale::new(&[
    "#2596be", "#2cba00", "#ECF126", "#ffa700", "#ff0000", "#21130d",
]);

impl ColorScale {
    pub const fn new(colors: &'static [&'static str]) -> Self {
        Self { colors }
    }

    pub fn ranges(&self) -> Vec<(RangeInclusive<i64>, &'static str)> {
        let n = self.colors.len() as i64;
        if n == 0 {
            return Vec::new();
        }
        let step = (100 / n).max(1);

        self.colors
            .iter()
            .take(100)
            .enumerate()
            .map(|(i, color)| {
                let i = i as i64;
                let lower = if i == 0 { 0 } else { i * step + 1 };
                let upper = if i == n.min(100) - 1 { 100 } else { (i + 1) * step };
                (lower..=upper, *color)
            })
            .collect()
    }

    pub fn color_for(&self, value: i64) -> Option<&'static str> {
        self.ranges()
            .into_iter()
            .find(|(range, _)| range.contains(&value))
            .map(|(_, color)| color)
    }
}

pub fn format_completion(percent: u8) -> StyledLabel {
    StyledLabel {
        text: format!("{percent} %"),
        color: COMPLETION_SCALE.color_for(i64::from(percent)),
    }
}

/// Labels the monthly lapse counter.
pub fn format_composite(value: i64) -> StyledLabel {
    StyledLabel {
        text: value.to_string(),
        color: COUNTER_SCALE.color_for(value),
    }
}

pub fn format_wellbeing(value: f64) -> StyledLabel {
    StyledLabel {
        text: format!("{value:.2}"),
        color: Some(WellBeingTier::of(value).color()),
    }
}

pub fn completion_label(score: &Score) -> StyledLabel {
    score.map_or_else(|_| StyledLabel::missing(), format_completion)
}

pub fn counter_label(counter: &Result<i64, Unavailable>) -> StyledLabel {
    counter.map_or_else(|_| StyledLabel::missing(), format_composite)
}

pub fn wellbeing_label(value: Option<f64>) -> StyledLabel {
    value.map_or_else(StyledLabel::missing, format_wellbeing)
}
