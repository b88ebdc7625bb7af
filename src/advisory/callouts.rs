//! Independent per-day callouts shown beside the outfit advisory
//!
//! These read the raw record (no default substitution) and are recomputed on
//! every render rather than stored on the advisory.

use crate::models::DailyForecast;
use serde::{Deserialize, Serialize};

/// Chance of rain at which the umbrella callout appears
pub const UMBRELLA_CALLOUT_POP: f64 = 50.0;
/// Daily high at which the sunscreen callout appears
pub const SUNSCREEN_CALLOUT_TEMP: f64 = 30.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Callouts {
    /// "Bring umbrella", shown with the day's chance of rain
    pub bring_umbrella: bool,
    pub apply_sunscreen: bool,
    /// The raw chance of rain, for the umbrella callout text
    pub pop: Option<f64>,
}

impl Callouts {
    #[must_use]
    pub fn for_day(day: &DailyForecast) -> Self {
        Self {
            bring_umbrella: day.pop.is_some_and(|p| p >= UMBRELLA_CALLOUT_POP),
            apply_sunscreen: day.temp_max.is_some_and(|t| t >= SUNSCREEN_CALLOUT_TEMP),
            pop: day.pop,
        }
    }

    /// Callout texts in display order
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.bring_umbrella {
            out.push(format!("☔ Bring umbrella ({})", crate::format::pct(self.pop)));
        }
        if self.apply_sunscreen {
            out.push("🧴 Apply sunscreen".to_string());
        }
        out
    }
}
