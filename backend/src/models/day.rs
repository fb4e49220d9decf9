use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::month::MonthKey;

/// One calendar day of the log. A single schema serves every year; which
/// columns count toward completion is decided by the day's rule set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DayRecord {
    pub day_date: NaiveDate,
    pub month_key: String,

    // Psyche
    pub milam: bool,
    pub dream: bool,
    pub sunwalk: bool,
    pub med: bool,
    pub med2: bool,
    pub med3: bool,
    pub tetris: bool,
    pub satyr: bool,
    pub relax: bool,

    // Relationships
    pub mirroring: bool,
    pub appreciation: bool,
    pub helpfulness: bool,
    pub small_talk: bool,

    // Body
    pub sleep: f64,
    pub fasting: f64,
    pub drink_food: bool,
    pub eat_before_leaving: bool,
    pub eat_clean: bool,
    pub meals_x4: bool,
    pub face_care: bool,
    pub flaxseed: bool,
    pub spirulina: bool,
    pub green_veggies: bool,
    pub lions_mane: bool,
    pub pickles: bool,
    pub fish_oil_or_d3: bool,
    pub water: bool,
    pub coffee_x2: bool,
    pub lapses: Option<i16>,
    pub warmup: bool,
    pub stretching: bool,
    pub workout: Option<String>,
    pub micro_w: Option<String>,
    pub mass: Option<String>,
    pub iso: Option<String>,
    pub cardio: Option<String>,

    // Mind
    pub rpg: bool,
    pub code: bool,
    pub eng: bool,
    pub de: bool,
    pub fr: bool,
    pub ukr: bool,

    // Marks, 0-5
    pub awareness: Option<i16>,
    pub happiness: Option<i16>,
    pub openness: Option<i16>,
    pub focus: Option<i16>,
    pub anger: Option<i16>,
    pub fear: Option<i16>,
    pub emptiness: Option<i16>,
    pub chaos: Option<i16>,

    // Journal
    pub dreams: Option<String>,
    pub events: Option<String>,
    pub ideas: Option<String>,
    pub comments: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Habit columns a rule set can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Milam,
    Dream,
    Sunwalk,
    Med,
    Med2,
    Med3,
    Tetris,
    Satyr,
    Relax,
    Mirroring,
    Appreciation,
    Helpfulness,
    SmallTalk,
    Sleep,
    Fasting,
    DrinkFood,
    EatBeforeLeaving,
    EatClean,
    MealsX4,
    FaceCare,
    Flaxseed,
    Spirulina,
    GreenVeggies,
    LionsMane,
    Pickles,
    FishOilOrD3,
    Water,
    CoffeeX2,
    Lapses,
    Warmup,
    Stretching,
    Workout,
    MicroW,
    Mass,
    Iso,
    Cardio,
    Rpg,
    Code,
    Eng,
    De,
    Fr,
    Ukr,
}

impl Field {
    /// Column name, also used as the default display label.
    pub fn name(self) -> &'static str {
        match self {
            Field::Milam => "milam",
            Field::Dream => "dream",
            Field::Sunwalk => "sunwalk",
            Field::Med => "med",
            Field::Med2 => "med2",
            Field::Med3 => "med3",
            Field::Tetris => "tetris",
            Field::Satyr => "satyr",
            Field::Relax => "relax",
            Field::Mirroring => "mirroring",
            Field::Appreciation => "appreciation",
            Field::Helpfulness => "helpfulness",
            Field::SmallTalk => "small_talk",
            Field::Sleep => "sleep",
            Field::Fasting => "fasting",
            Field::DrinkFood => "drink_food",
            Field::EatBeforeLeaving => "eat_before_leaving",
            Field::EatClean => "eat_clean",
            Field::MealsX4 => "meals_x4",
            Field::FaceCare => "face_care",
            Field::Flaxseed => "flaxseed",
            Field::Spirulina => "spirulina",
            Field::GreenVeggies => "green_veggies",
            Field::LionsMane => "lions_mane",
            Field::Pickles => "pickles",
            Field::FishOilOrD3 => "fish_oil_or_d3",
            Field::Water => "water",
            Field::CoffeeX2 => "coffee_x2",
            Field::Lapses => "lapses",
            Field::Warmup => "warmup",
            Field::Stretching => "stretching",
            Field::Workout => "workout",
            Field::MicroW => "micro_w",
            Field::Mass => "mass",
            Field::Iso => "iso",
            Field::Cardio => "cardio",
            Field::Rpg => "rpg",
            Field::Code => "code",
            Field::Eng => "eng",
            Field::De => "de",
            Field::Fr => "fr",
            Field::Ukr => "ukr",
        }
    }
}

/// A borrowed view of one habit column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Flag(bool),
    Number(f64),
    Text(&'a str),
}

impl DayRecord {
    /// A fresh, untouched day: every habit off, counters at zero, no marks.
    pub fn new(day_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            day_date,
            month_key: MonthKey::of(day_date).to_string(),
            milam: false,
            dream: false,
            sunwalk: false,
            med: false,
            med2: false,
            med3: false,
            tetris: false,
            satyr: false,
            relax: false,
            mirroring: false,
            appreciation: false,
            helpfulness: false,
            small_talk: false,
            sleep: 0.0,
            fasting: 0.0,
            drink_food: false,
            eat_before_leaving: false,
            eat_clean: false,
            meals_x4: false,
            face_care: false,
            flaxseed: false,
            spirulina: false,
            green_veggies: false,
            lions_mane: false,
            pickles: false,
            fish_oil_or_d3: false,
            water: false,
            coffee_x2: false,
            lapses: Some(0),
            warmup: false,
            stretching: false,
            workout: None,
            micro_w: None,
            mass: None,
            iso: None,
            cardio: None,
            rpg: false,
            code: false,
            eng: false,
            de: false,
            fr: false,
            ukr: false,
            awareness: None,
            happiness: None,
            openness: None,
            focus: None,
            anger: None,
            fear: None,
            emptiness: None,
            chaos: None,
            dreams: None,
            events: None,
            ideas: None,
            comments: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current value of a habit column; `None` when nothing was recorded.
    pub fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Milam => flag(self.milam),
            Field::Dream => flag(self.dream),
            Field::Sunwalk => flag(self.sunwalk),
            Field::Med => flag(self.med),
            Field::Med2 => flag(self.med2),
            Field::Med3 => flag(self.med3),
            Field::Tetris => flag(self.tetris),
            Field::Satyr => flag(self.satyr),
            Field::Relax => flag(self.relax),
            Field::Mirroring => flag(self.mirroring),
            Field::Appreciation => flag(self.appreciation),
            Field::Helpfulness => flag(self.helpfulness),
            Field::SmallTalk => flag(self.small_talk),
            Field::Sleep => Some(FieldValue::Number(self.sleep)),
            Field::Fasting => Some(FieldValue::Number(self.fasting)),
            Field::DrinkFood => flag(self.drink_food),
            Field::EatBeforeLeaving => flag(self.eat_before_leaving),
            Field::EatClean => flag(self.eat_clean),
            Field::MealsX4 => flag(self.meals_x4),
            Field::FaceCare => flag(self.face_care),
            Field::Flaxseed => flag(self.flaxseed),
            Field::Spirulina => flag(self.spirulina),
            Field::GreenVeggies => flag(self.green_veggies),
            Field::LionsMane => flag(self.lions_mane),
            Field::Pickles => flag(self.pickles),
            Field::FishOilOrD3 => flag(self.fish_oil_or_d3),
            Field::Water => flag(self.water),
            Field::CoffeeX2 => flag(self.coffee_x2),
            Field::Lapses => self.lapses.map(|v| FieldValue::Number(f64::from(v))),
            Field::Warmup => flag(self.warmup),
            Field::Stretching => flag(self.stretching),
            Field::Workout => text(&self.workout),
            Field::MicroW => text(&self.micro_w),
            Field::Mass => text(&self.mass),
            Field::Iso => text(&self.iso),
            Field::Cardio => text(&self.cardio),
            Field::Rpg => flag(self.rpg),
            Field::Code => flag(self.code),
            Field::Eng => flag(self.eng),
            Field::De => flag(self.de),
            Field::Fr => flag(self.fr),
            Field::Ukr => flag(self.ukr),
        }
    }

    pub fn positive_marks(&self) -> [Option<i16>; 4] {
        [self.awareness, self.happiness, self.openness, self.focus]
    }

    pub fn negative_marks(&self) -> [Option<i16>; 4] {
        [self.anger, self.fear, self.emptiness, self.chaos]
    }
}

fn flag(value: bool) -> Option<FieldValue<'static>> {
    Some(FieldValue::Flag(value))
}

fn text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(FieldValue::Text)
}
