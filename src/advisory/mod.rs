//! Outfit advisory engine
//!
//! Maps one day's forecast to a severity level and a short list of items to
//! bring. Classification is an ordered pipeline over an accumulating
//! level-and-items pair:
//!
//! 1. [`temperature_tier`] picks the base level and items
//! 2. [`precipitation_override`] may upgrade the level to rainy and appends rain gear
//! 3. [`hydration_floor`] adds water on warm days
//! 4. [`truncate`] caps the list for display
//!
//! Missing readings are replaced by fixed defaults in [`DayReadings::from_forecast`]
//! before any rule runs, so every input yields a determinate advisory.

pub mod callouts;
pub mod items;

pub use callouts::Callouts;
pub use items::{AdvisoryItem, ItemCategory, ItemIcon, ItemKind};

use crate::format;
use crate::models::DailyForecast;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

pub const HOT_TEMP: f64 = 32.0;
pub const WARM_TEMP: f64 = 28.0;
/// Inclusive: a high of exactly this is cool
pub const COOL_TEMP: f64 = 22.0;
pub const HEAVY_RAIN_POP: f64 = 80.0;
pub const HEAVY_RAIN_MM: f64 = 5.0;
pub const LIGHT_RAIN_POP: f64 = 50.0;
pub const LIGHT_RAIN_MM: f64 = 2.0;
pub const HYDRATION_TEMP: f64 = 25.0;
pub const MAX_ITEMS: usize = 4;

pub const DEFAULT_TEMP_MAX: f64 = 25.0;
pub const DEFAULT_TEMP_MIN: f64 = 20.0;
pub const DEFAULT_POP: f64 = 0.0;
pub const DEFAULT_RAIN_MM: f64 = 0.0;

/// Label used for the first day of a sequence
pub const TODAY_LABEL: &str = "Today";

/// Overall severity of a day, exactly one per advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryLevel {
    #[default]
    Normal,
    Mild,
    Cool,
    Warm,
    Hot,
    Rainy,
}

impl AdvisoryLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Mild => "mild",
            Self::Cool => "cool",
            Self::Warm => "warm",
            Self::Hot => "hot",
            Self::Rainy => "rainy",
        }
    }

    #[must_use]
    pub fn display_category(&self) -> DisplayCategory {
        match self {
            Self::Normal => DisplayCategory::Neutral,
            Self::Mild => DisplayCategory::Emerald,
            Self::Cool => DisplayCategory::Blue,
            Self::Warm => DisplayCategory::Orange,
            Self::Hot => DisplayCategory::Red,
            Self::Rainy => DisplayCategory::Indigo,
        }
    }
}

impl fmt::Display for AdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour class the presentation layer uses for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCategory {
    #[default]
    Neutral,
    Red,
    Orange,
    Blue,
    Emerald,
    Indigo,
}

/// A day's readings with defaults applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReadings {
    pub temp_max: f64,
    pub temp_min: f64,
    pub pop: f64,
    pub rain_mm: f64,
}

impl Default for DayReadings {
    fn default() -> Self {
        Self {
            temp_max: DEFAULT_TEMP_MAX,
            temp_min: DEFAULT_TEMP_MIN,
            pop: DEFAULT_POP,
            rain_mm: DEFAULT_RAIN_MM,
        }
    }
}

impl DayReadings {
    /// A reading counts as missing when it is absent, not finite, or zero.
    #[must_use]
    pub fn from_forecast(day: &DailyForecast) -> Self {
        Self {
            temp_max: reading_or(day.temp_max, DEFAULT_TEMP_MAX),
            temp_min: reading_or(day.temp_min, DEFAULT_TEMP_MIN),
            pop: reading_or(day.pop, DEFAULT_POP),
            rain_mm: reading_or(day.rain_mm, DEFAULT_RAIN_MM),
        }
    }

    fn heavy_rain(&self) -> bool {
        self.pop >= HEAVY_RAIN_POP || self.rain_mm >= HEAVY_RAIN_MM
    }

    fn light_rain(&self) -> bool {
        self.pop >= LIGHT_RAIN_POP || self.rain_mm >= LIGHT_RAIN_MM
    }
}

fn reading_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    }
}

/// Level and items as they build up through the pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulation {
    pub level: AdvisoryLevel,
    pub items: Vec<AdvisoryItem>,
}

impl Accumulation {
    #[must_use]
    pub fn new(level: AdvisoryLevel, kinds: &[ItemKind]) -> Self {
        Self {
            level,
            items: kinds.iter().copied().map(AdvisoryItem::from).collect(),
        }
    }

    /// Exact name match; categories are not considered
    #[must_use]
    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    fn push(&mut self, kind: ItemKind) {
        self.items.push(kind.into());
    }

    fn push_unless_named(&mut self, kind: ItemKind, name: &str) {
        if !self.has_item(name) {
            self.push(kind);
        }
    }
}

/// Base level and items from the daily high, first matching tier wins
#[must_use]
pub fn temperature_tier(readings: &DayReadings) -> Accumulation {
    let t = readings.temp_max;
    if t >= HOT_TEMP {
        Accumulation::new(
            AdvisoryLevel::Hot,
            &[
                ItemKind::Sunglasses,
                ItemKind::Sunscreen,
                ItemKind::CapOrHat,
                ItemKind::LightShirt,
                ItemKind::WaterBottle,
            ],
        )
    } else if t >= WARM_TEMP {
        Accumulation::new(
            AdvisoryLevel::Warm,
            &[
                ItemKind::Sunscreen,
                ItemKind::Hat,
                ItemKind::TShirt,
                ItemKind::Water,
            ],
        )
    } else if t <= COOL_TEMP {
        Accumulation::new(AdvisoryLevel::Cool, &[ItemKind::Jacket, ItemKind::Pants])
    } else {
        Accumulation::new(AdvisoryLevel::Mild, &[ItemKind::TShirt])
    }
}

/// Heavy rain sets the level to rainy and appends full rain gear. Moderate
/// rain keeps the level and tops up an umbrella and a light jacket unless
/// items with those exact names are already listed.
#[must_use]
pub fn precipitation_override(mut acc: Accumulation, readings: &DayReadings) -> Accumulation {
    if readings.heavy_rain() {
        acc.level = AdvisoryLevel::Rainy;
        acc.push(ItemKind::Umbrella);
        acc.push(ItemKind::RainBoots);
        acc.push(ItemKind::Raincoat);
    } else if readings.light_rain() {
        // TODO: dedupe by ItemCategory instead of these literal names
        acc.push_unless_named(ItemKind::CompactUmbrella, "Umbrella");
        acc.push_unless_named(ItemKind::LightJacket, "Jacket");
    }
    acc
}

#[must_use]
pub fn hydration_floor(mut acc: Accumulation, readings: &DayReadings) -> Accumulation {
    if readings.temp_max >= HYDRATION_TEMP {
        acc.push_unless_named(ItemKind::Water, "Water");
    }
    acc
}

/// Keep the first [`MAX_ITEMS`] in accumulation order
#[must_use]
pub fn truncate(mut acc: Accumulation) -> Accumulation {
    acc.items.truncate(MAX_ITEMS);
    acc
}

/// Every rule except the display cap
#[must_use]
pub fn accumulate(readings: &DayReadings) -> Accumulation {
    let acc = temperature_tier(readings);
    let acc = precipitation_override(acc, readings);
    hydration_floor(acc, readings)
}

/// Advisory for one day, derived fresh on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAdvisory {
    pub level: AdvisoryLevel,
    pub display_category: DisplayCategory,
    pub items: Vec<AdvisoryItem>,
    pub display_label: String,
}

impl DailyAdvisory {
    /// Advisory for a missing day record
    #[must_use]
    pub fn empty(day_index: usize) -> Self {
        Self {
            level: AdvisoryLevel::Normal,
            display_category: DisplayCategory::Neutral,
            items: Vec::new(),
            display_label: display_label(None, day_index),
        }
    }
}

/// "Today" for the first day, the short weekday name otherwise
#[must_use]
pub fn display_label(date: Option<NaiveDate>, day_index: usize) -> String {
    if day_index == 0 {
        TODAY_LABEL.to_string()
    } else {
        format::short_day(date)
    }
}

#[must_use]
pub fn advise(day: Option<&DailyForecast>, day_index: usize) -> DailyAdvisory {
    let Some(day) = day else {
        return DailyAdvisory::empty(day_index);
    };

    let readings = DayReadings::from_forecast(day);
    let acc = truncate(accumulate(&readings));
    trace!(day_index, level = %acc.level, items = acc.items.len(), "Advisory computed");

    DailyAdvisory {
        level: acc.level,
        display_category: acc.level.display_category(),
        items: acc.items,
        display_label: display_label(day.date, day_index),
    }
}

/// Advisories for the first `count` days of an outlook
#[must_use]
pub fn advise_days(days: &[DailyForecast], count: usize) -> Vec<DailyAdvisory> {
    days.iter()
        .take(count)
        .enumerate()
        .map(|(index, day)| advise(Some(day), index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn day(temp_max: Option<f64>, pop: Option<f64>, rain_mm: Option<f64>) -> DailyForecast {
        DailyForecast {
            temp_max,
            pop,
            rain_mm,
            ..DailyForecast::default()
        }
    }

    fn names(items: &[AdvisoryItem]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[rstest]
    #[case(40.0, AdvisoryLevel::Hot)]
    #[case(32.0, AdvisoryLevel::Hot)]
    #[case(31.99, AdvisoryLevel::Warm)]
    #[case(28.0, AdvisoryLevel::Warm)]
    #[case(27.99, AdvisoryLevel::Mild)]
    #[case(22.01, AdvisoryLevel::Mild)]
    #[case(22.0, AdvisoryLevel::Cool)]
    #[case(-5.0, AdvisoryLevel::Cool)]
    fn test_temperature_tier_boundaries(#[case] temp_max: f64, #[case] level: AdvisoryLevel) {
        let advisory = advise(Some(&day(Some(temp_max), None, None)), 1);
        assert_eq!(advisory.level, level);
        assert_eq!(advisory.display_category, level.display_category());
    }

    #[rstest]
    #[case(Some(80.0), None, AdvisoryLevel::Rainy)]
    #[case(None, Some(5.0), AdvisoryLevel::Rainy)]
    #[case(Some(79.9), Some(4.9), AdvisoryLevel::Mild)]
    #[case(Some(50.0), None, AdvisoryLevel::Mild)]
    fn test_precipitation_level(
        #[case] pop: Option<f64>,
        #[case] rain_mm: Option<f64>,
        #[case] level: AdvisoryLevel,
    ) {
        let advisory = advise(Some(&day(Some(24.0), pop, rain_mm)), 1);
        assert_eq!(advisory.level, level);
    }

    #[test]
    fn test_hot_and_heavy_rain_today() {
        let forecast = DailyForecast::default().with_temps(33.0, 26.0).with_rain(85.0, 6.0);
        let advisory = advise(Some(&forecast), 0);

        assert_eq!(advisory.level, AdvisoryLevel::Rainy);
        assert_eq!(advisory.display_category, DisplayCategory::Indigo);
        assert_eq!(advisory.display_label, "Today");
        assert_eq!(
            names(&advisory.items),
            vec!["Sunglasses", "Sunscreen", "Cap/Hat", "Light shirt"]
        );

        let full = accumulate(&DayReadings::from_forecast(&forecast));
        assert_eq!(
            names(&full.items),
            vec![
                "Sunglasses",
                "Sunscreen",
                "Cap/Hat",
                "Light shirt",
                "Water bottle",
                "Umbrella",
                "Rain boots",
                "Raincoat",
                "Water"
            ]
        );
        let umbrella = &full.items[5];
        assert_eq!(umbrella.category, ItemCategory::Essential);
        assert_eq!(umbrella.icon, ItemIcon::Umbrella);
        assert_eq!(full.items[6].category, ItemCategory::Footwear);
        assert_eq!(full.items[7].category, ItemCategory::Clothing);
    }

    #[test]
    fn test_mild_with_moderate_rain() {
        let forecast = DailyForecast {
            date: NaiveDate::from_ymd_opt(2024, 5, 8),
            temp_max: Some(24.0),
            pop: Some(55.0),
            rain_mm: Some(0.0),
            ..DailyForecast::default()
        };
        let advisory = advise(Some(&forecast), 2);

        assert_eq!(advisory.level, AdvisoryLevel::Mild);
        assert_eq!(advisory.display_label, "Wed");
        assert_eq!(names(&advisory.items), vec!["T-shirt", "Umbrella", "Light jacket"]);
        assert_eq!(advisory.items[1].icon, ItemIcon::ClosedUmbrella);
    }

    #[test]
    fn test_cool_jacket_blocks_light_jacket() {
        let advisory = advise(Some(&day(Some(20.0), Some(60.0), None)), 1);
        assert_eq!(advisory.level, AdvisoryLevel::Cool);
        assert_eq!(names(&advisory.items), vec!["Jacket", "Pants", "Umbrella"]);
    }

    #[test]
    fn test_warm_with_moderate_rain_is_capped() {
        let forecast = day(Some(29.0), None, Some(2.0));
        let full = accumulate(&DayReadings::from_forecast(&forecast));
        assert_eq!(
            names(&full.items),
            vec!["Sunscreen", "Hat", "T-shirt", "Water", "Umbrella", "Light jacket"]
        );

        let advisory = advise(Some(&forecast), 1);
        assert_eq!(names(&advisory.items), vec!["Sunscreen", "Hat", "T-shirt", "Water"]);
    }

    #[test]
    fn test_existing_umbrella_not_duplicated() {
        let readings = DayReadings {
            pop: 60.0,
            ..DayReadings::default()
        };
        let acc = Accumulation::new(AdvisoryLevel::Mild, &[ItemKind::Umbrella]);
        let acc = precipitation_override(acc, &readings);
        assert_eq!(names(&acc.items), vec!["Umbrella", "Light jacket"]);
        assert_eq!(acc.items[0].icon, ItemIcon::Umbrella);
    }

    #[test]
    fn test_raincoat_does_not_block_light_jacket() {
        let readings = DayReadings {
            rain_mm: 3.0,
            ..DayReadings::default()
        };
        let acc = Accumulation::new(AdvisoryLevel::Mild, &[ItemKind::Raincoat]);
        let acc = precipitation_override(acc, &readings);
        assert!(acc.has_item("Light jacket"));
        assert_eq!(acc.level, AdvisoryLevel::Mild);
    }

    #[rstest]
    #[case(25.0, true)]
    #[case(24.9, false)]
    fn test_hydration_floor(#[case] temp_max: f64, #[case] water: bool) {
        let advisory = advise(Some(&day(Some(temp_max), None, None)), 1);
        assert_eq!(advisory.items.iter().any(|i| i.name == "Water"), water);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let advisory = advise(Some(&DailyForecast::default()), 0);
        assert_eq!(advisory.level, AdvisoryLevel::Mild);
        assert_eq!(names(&advisory.items), vec!["T-shirt", "Water"]);
    }

    #[test]
    fn test_zero_and_nan_count_as_missing() {
        let zero = DayReadings::from_forecast(&day(Some(0.0), None, None));
        let nan = DayReadings::from_forecast(&day(Some(f64::NAN), None, None));
        assert_eq!(zero, DayReadings::default());
        assert_eq!(nan, DayReadings::default());
    }

    #[rstest]
    fn test_null_day(#[values(0, 1, 6)] index: usize) {
        let advisory = advise(None, index);
        assert!(advisory.items.is_empty());
        assert_eq!(advisory.level, AdvisoryLevel::Normal);
        assert_eq!(advisory.display_category, DisplayCategory::Neutral);
    }

    #[rstest]
    fn test_hot_days_carry_one_water_bottle(#[values(32.0, 35.5, 45.0)] temp_max: f64) {
        let forecast = day(Some(temp_max), Some(20.0), None);
        let capped = advise(Some(&forecast), 1);
        assert_eq!(capped.level, AdvisoryLevel::Hot);
        // fifth in order, so the cap drops it from the shown list
        assert!(!capped.items.iter().any(|i| i.name == "Water bottle"));

        let full = accumulate(&DayReadings::from_forecast(&forecast));
        let bottles = full.items.iter().filter(|i| i.name == "Water bottle").count();
        assert_eq!(bottles, 1);
    }

    #[rstest]
    fn test_items_capped_and_unique(
        #[values(None, Some(0.0), Some(15.0), Some(22.0), Some(25.0), Some(28.0), Some(32.0), Some(38.0))]
        temp_max: Option<f64>,
        #[values(None, Some(49.9), Some(50.0), Some(80.0))] pop: Option<f64>,
        #[values(None, Some(1.9), Some(2.0), Some(5.0))] rain_mm: Option<f64>,
    ) {
        let advisory = advise(Some(&day(temp_max, pop, rain_mm)), 1);
        assert!(advisory.items.len() <= MAX_ITEMS);

        let unique: HashSet<&str> = names(&advisory.items).into_iter().collect();
        assert_eq!(unique.len(), advisory.items.len());

        let full = accumulate(&DayReadings::from_forecast(&day(temp_max, pop, rain_mm)));
        let unique: HashSet<&str> = names(&full.items).into_iter().collect();
        assert_eq!(unique.len(), full.items.len());
    }

    #[rstest]
    fn test_mild_without_rain(
        #[values(22.5, 24.0, 25.0, 27.9)] temp_max: f64,
        #[values(None, Some(10.0), Some(49.0))] pop: Option<f64>,
        #[values(None, Some(1.9))] rain_mm: Option<f64>,
    ) {
        let advisory = advise(Some(&day(Some(temp_max), pop, rain_mm)), 1);
        assert_eq!(advisory.level, AdvisoryLevel::Mild);
    }

    #[test]
    fn test_advise_days_labels() {
        let days: Vec<DailyForecast> = (6..=12)
            .map(|d| DailyForecast::new(NaiveDate::from_ymd_opt(2024, 5, d)).with_temps(30.0, 24.0))
            .collect();
        let advisories = advise_days(&days, 5);

        assert_eq!(advisories.len(), 5);
        let labels: Vec<&str> = advisories.iter().map(|a| a.display_label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Tue", "Wed", "Thu", "Fri"]);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&AdvisoryLevel::Rainy).unwrap();
        assert_eq!(json, "\"rainy\"");
        let json = serde_json::to_string(&DisplayCategory::Emerald).unwrap();
        assert_eq!(json, "\"emerald\"");
    }
}
