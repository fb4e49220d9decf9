//! The rule catalog: which habits counted toward completion in which period.
//!
//! One literal table per period. Neighbouring periods share no structure
//! beyond the `RuleSet` shape.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::Unavailable;
use crate::models::day::Field::{self, *};

#[derive(Debug, Serialize)]
pub struct RuleSet {
    pub key: &'static str,
    pub title: &'static str,
    /// Columns shown for the period, in display order.
    pub fields: &'static [Field],
    pub must_be_true: &'static [Field],
    pub must_be_zero: &'static [Field],
    pub minimums: &'static [Minimum],
    pub non_empty: &'static [Field],
    /// Exercise-style group: any one filled member scores a single point.
    pub one_of: &'static [Field],
    /// Whether the `one_of` point also adds a slot to the total.
    pub one_of_counts_toward_total: bool,
    pub labels: &'static [Label],
}

#[derive(Debug, Serialize)]
pub struct Minimum {
    pub field: Field,
    pub at_least: f64,
}

#[derive(Debug, Serialize)]
pub struct Label {
    pub field: Field,
    pub text: &'static str,
}

impl RuleSet {
    /// Number of scoring slots a day is measured against.
    pub fn total(&self) -> usize {
        let mut total = self.must_be_true.len()
            + self.must_be_zero.len()
            + self.minimums.len()
            + self.non_empty.len();
        if self.one_of_counts_toward_total && !self.one_of.is_empty() {
            total += 1;
        }
        total
    }

    pub fn label(&self, field: Field) -> &'static str {
        self.labels
            .iter()
            .find(|label| label.field == field)
            .map(|label| label.text)
            .unwrap_or_else(|| field.name())
    }
}

/// A period of one calendar year and the rules in force during it.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub year: i32,
    pub first_month: u32,
    pub last_month: u32,
    pub rules: &'static RuleSet,
}

impl CatalogEntry {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && (self.first_month..=self.last_month).contains(&date.month())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.first_month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.last_month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.last_month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
    }
}

/// Sorted by period; periods never overlap.
pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry { year: 2016, first_month: 1, last_month: 12, rules: &RULES_2016 },
    CatalogEntry { year: 2017, first_month: 1, last_month: 7, rules: &RULES_2017_JAN_JUL },
    CatalogEntry { year: 2017, first_month: 8, last_month: 12, rules: &RULES_2017_AUG_DEC },
    CatalogEntry { year: 2018, first_month: 1, last_month: 12, rules: &RULES_2018 },
    CatalogEntry { year: 2019, first_month: 1, last_month: 12, rules: &RULES_2019 },
    CatalogEntry { year: 2020, first_month: 1, last_month: 12, rules: &RULES_2020 },
    CatalogEntry { year: 2021, first_month: 1, last_month: 12, rules: &RULES_2021 },
    CatalogEntry { year: 2022, first_month: 1, last_month: 12, rules: &RULES_2022 },
    CatalogEntry { year: 2023, first_month: 1, last_month: 12, rules: &RULES_2023 },
];

pub fn resolve_rule_set(date: NaiveDate) -> Result<&'static RuleSet, Unavailable> {
    CATALOG
        .iter()
        .find(|entry| entry.contains(date))
        .map(|entry| entry.rules)
        .ok_or(Unavailable::NoRuleSet { date })
}

pub fn find_entry(key: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.rules.key == key)
}

const SLEEP_7: Minimum = Minimum { field: Sleep, at_least: 7.0 };
const FASTING_12: Minimum = Minimum { field: Fasting, at_least: 12.0 };
const FASTING_14: Minimum = Minimum { field: Fasting, at_least: 14.0 };

const fn label(field: Field, text: &'static str) -> Label {
    Label { field, text }
}

static RULES_2016: RuleSet = RuleSet {
    key: "2016",
    title: "TODO 2016[end]",
    fields: &[Med2, Med3, Satyr, Sleep, MealsX4, Workout],
    must_be_true: &[Med2, Med3, Satyr, MealsX4],
    must_be_zero: &[],
    minimums: &[SLEEP_7],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[label(Med2, "DoNothing"), label(Med3, "Awareness")],
};

static RULES_2017_JAN_JUL: RuleSet = RuleSet {
    key: "2017-jan-jul",
    title: "TODO 2017[1] Jan-Jul",
    fields: &[
        Milam, Dream, Med, Med2, Med3, Satyr, Relax,
        Sleep, FaceCare,
        Water, Spirulina, Flaxseed,
        EatBeforeLeaving, MealsX4, CoffeeX2, Lapses,
        Warmup, Workout,
        Eng, De, Fr,
        Helpfulness, SmallTalk,
    ],
    must_be_true: &[
        Milam, Dream, Med, Med2, Med3, Satyr, Relax,
        Flaxseed, Spirulina, Water,
        EatBeforeLeaving, MealsX4, FaceCare,
        CoffeeX2, Warmup,
        Eng, De, Fr,
        Helpfulness, SmallTalk,
    ],
    must_be_zero: &[Lapses],
    minimums: &[SLEEP_7],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[
        label(Med, "Mindfulness"),
        label(Med2, "Contemplation"),
        label(Med3, "Awareness"),
    ],
};

static RULES_2017_AUG_DEC: RuleSet = RuleSet {
    key: "2017-aug-dec",
    title: "TODO 2017[2] Aug-Dec",
    fields: &[
        Milam, Dream, Med, Med3, Tetris, Satyr, Relax,
        Sleep, FaceCare,
        Water, Spirulina, Flaxseed, FishOilOrD3,
        EatBeforeLeaving, MealsX4, CoffeeX2, Lapses,
        Warmup, Workout,
        Code, Eng, De, Fr,
        Helpfulness, SmallTalk,
    ],
    must_be_true: &[
        Milam, Dream, Med, Med3, Tetris, Satyr, Relax,
        Flaxseed, Spirulina, FishOilOrD3, Water,
        EatBeforeLeaving, MealsX4, FaceCare,
        CoffeeX2, Warmup,
        Code, Eng, De, Fr,
        Helpfulness, SmallTalk,
    ],
    must_be_zero: &[Lapses],
    minimums: &[SLEEP_7],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[label(Med, "Mindfulness"), label(Med3, "Awareness")],
};

static RULES_2018: RuleSet = RuleSet {
    key: "2018",
    title: "TODO 2018",
    fields: &[
        Milam, Dream, Med, Med2, Med3, Tetris, Satyr, Relax,
        Sleep, FaceCare,
        Water, Spirulina, FishOilOrD3,
        EatBeforeLeaving, MealsX4, CoffeeX2, Lapses,
        Warmup, Workout,
        Code, Eng, De, Fr, Ukr,
        Mirroring, Appreciation, Helpfulness,
    ],
    must_be_true: &[
        Milam, Dream, Med, Med2, Med3, Tetris, Satyr, Relax,
        Water, Spirulina, FishOilOrD3,
        EatBeforeLeaving, MealsX4, FaceCare,
        CoffeeX2, Warmup,
        Code, Eng, De, Fr, Ukr,
        Mirroring, Appreciation, Helpfulness,
    ],
    must_be_zero: &[Lapses],
    minimums: &[SLEEP_7],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[
        label(Med, "Mindfulness"),
        label(Med2, "FOCUS"),
        label(Med3, "Awareness"),
    ],
};

// `stretching` scores in 2019 without being shown.
static RULES_2019: RuleSet = RuleSet {
    key: "2019",
    title: "TODO 2019",
    fields: &[
        Dream, Med, Med2, Med3, Tetris, Relax,
        Sleep, FaceCare,
        Water, Spirulina, FishOilOrD3,
        EatBeforeLeaving, CoffeeX2, Lapses, EatClean, Fasting, DrinkFood,
        Warmup, Workout,
        Rpg, Code, Eng, De, Fr, Ukr,
    ],
    must_be_true: &[
        Dream, Med, Med2, Med3, Tetris, Relax,
        Spirulina, FishOilOrD3, Water, DrinkFood,
        EatBeforeLeaving, EatClean, FaceCare,
        CoffeeX2, Warmup, Stretching,
        Rpg, Code, Eng, De, Fr, Ukr,
    ],
    must_be_zero: &[Lapses],
    minimums: &[SLEEP_7, FASTING_12],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[
        label(Med, "Mindfulness"),
        label(Med2, "FOCUS"),
        label(Med3, "DoNothing"),
    ],
};

static RULES_2020: RuleSet = RuleSet {
    key: "2020",
    title: "TODO 2020",
    fields: &[
        Dream, Med, Med2, Med3, Tetris, Relax,
        Sleep,
        Water, Spirulina, FishOilOrD3, Flaxseed,
        CoffeeX2, Lapses, Fasting, DrinkFood,
        Warmup, Workout,
        Rpg, Code, Eng, De, Fr, Ukr,
    ],
    must_be_true: &[
        Dream, Med, Med2, Med3, Tetris, Relax,
        Flaxseed, Spirulina, FishOilOrD3, Water, DrinkFood,
        CoffeeX2, Warmup,
        Rpg, Code, Eng, De, Fr, Ukr,
    ],
    must_be_zero: &[Lapses],
    minimums: &[SLEEP_7, FASTING_12],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[
        label(Med, "Mindfulness"),
        label(Med2, "FOCUS"),
        label(Med3, "Contemplation"),
    ],
};

const FIELDS_2021: &[Field] = &[
    Med, Med2, Med3, Tetris, Relax,
    Sleep,
    Water, Spirulina, FishOilOrD3, Flaxseed,
    CoffeeX2, Lapses, Fasting, DrinkFood,
    Warmup, MicroW, Mass, Iso, Cardio, Stretching,
    Rpg, Code, Eng, De, Fr, Ukr,
];
const TRUE_2021: &[Field] = &[
    Med, Med2, Med3, Tetris, Relax,
    Flaxseed, Spirulina, FishOilOrD3, Water, DrinkFood,
    CoffeeX2, Warmup, Stretching,
    Rpg, Code, Eng, De, Fr, Ukr,
];
const MINIMUMS_2021: &[Minimum] = &[SLEEP_7, FASTING_14];
const EXERCISE_2021: &[Field] = &[MicroW, Mass, Iso, Cardio];
const LABELS_2021: &[Label] = &[
    label(Med, "FOCUS"),
    label(Med2, "Mindfulness"),
    label(Med3, "FOCUS"),
];

static RULES_2021: RuleSet = RuleSet {
    key: "2021",
    title: "TODO 2021",
    fields: FIELDS_2021,
    must_be_true: TRUE_2021,
    must_be_zero: &[Lapses],
    minimums: MINIMUMS_2021,
    non_empty: &[],
    one_of: EXERCISE_2021,
    one_of_counts_toward_total: true,
    labels: LABELS_2021,
};

static RULES_2022: RuleSet = RuleSet {
    key: "2022",
    title: "TODO 2022",
    fields: FIELDS_2021,
    must_be_true: TRUE_2021,
    must_be_zero: &[Lapses],
    minimums: MINIMUMS_2021,
    non_empty: &[],
    one_of: EXERCISE_2021,
    one_of_counts_toward_total: true,
    labels: LABELS_2021,
};

static RULES_2023: RuleSet = RuleSet {
    key: "2023",
    title: "TODO 2023",
    fields: &[
        Sunwalk, Med, Tetris, Relax,
        Sleep,
        Water, GreenVeggies, FishOilOrD3, Flaxseed, LionsMane, Pickles,
        CoffeeX2, Lapses, Fasting, DrinkFood,
        Warmup, Workout, Stretching,
        Code, Eng, De, Fr, Ukr,
    ],
    must_be_true: &[
        Sunwalk, Med, Tetris, Relax,
        DrinkFood, Flaxseed, GreenVeggies, LionsMane, Pickles,
        FishOilOrD3, Water, CoffeeX2, Warmup, Stretching,
        Code, Eng, De, Fr, Ukr,
    ],
    must_be_zero: &[Lapses],
    minimums: &[SLEEP_7, FASTING_14],
    non_empty: &[Workout],
    one_of: &[],
    one_of_counts_toward_total: false,
    labels: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolves_split_2017_by_month() {
        assert_eq!(resolve_rule_set(date(2017, 7, 31)).unwrap().key, "2017-jan-jul");
        assert_eq!(resolve_rule_set(date(2017, 8, 1)).unwrap().key, "2017-aug-dec");
    }

    #[test]
    fn test_resolves_every_catalogued_year() {
        for (year, key) in [
            (2016, "2016"),
            (2018, "2018"),
            (2019, "2019"),
            (2020, "2020"),
            (2021, "2021"),
            (2022, "2022"),
            (2023, "2023"),
        ] {
            assert_eq!(resolve_rule_set(date(year, 6, 15)).unwrap().key, key);
        }
    }

    #[test]
    fn test_uncatalogued_year_is_no_match() {
        let day = date(2015, 12, 31);
        assert_eq!(
            resolve_rule_set(day).unwrap_err(),
            Unavailable::NoRuleSet { date: day }
        );
        assert!(resolve_rule_set(date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_catalog_is_sorted_and_disjoint() {
        for pair in CATALOG.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.last_day().unwrap() < b.first_day().unwrap());
        }
    }

    #[test]
    fn test_totals_per_period() {
        let totals: Vec<(&str, usize)> = CATALOG
            .iter()
            .map(|entry| (entry.rules.key, entry.rules.total()))
            .collect();
        assert_eq!(
            totals,
            vec![
                ("2016", 6),
                ("2017-jan-jul", 23),
                ("2017-aug-dec", 25),
                ("2018", 27),
                ("2019", 26),
                ("2020", 23),
                ("2021", 23),
                ("2022", 23),
                ("2023", 23),
            ]
        );
    }

    #[test]
    fn test_one_of_adjustment_only_where_group_exists() {
        for entry in CATALOG {
            let rules = entry.rules;
            if rules.one_of_counts_toward_total {
                assert!(!rules.one_of.is_empty(), "{} flags an empty group", rules.key);
            }
        }
        assert!(find_entry("2021").unwrap().rules.one_of_counts_toward_total);
        assert!(find_entry("2022").unwrap().rules.one_of_counts_toward_total);
        assert!(!find_entry("2023").unwrap().rules.one_of_counts_toward_total);
    }

    #[test]
    fn test_labels_fall_back_to_column_names() {
        let rules = find_entry("2019").unwrap().rules;
        assert_eq!(rules.label(Med3), "DoNothing");
        assert_eq!(rules.label(Water), "water");
    }

    #[test]
    fn test_period_bounds() {
        let entry = find_entry("2017-jan-jul").unwrap();
        assert_eq!(entry.first_day(), Some(date(2017, 1, 1)));
        assert_eq!(entry.last_day(), Some(date(2017, 7, 31)));
        assert_eq!(find_entry("2016").unwrap().last_day(), Some(date(2016, 12, 31)));
    }
}
