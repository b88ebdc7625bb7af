//! Display formatting for dashboard values
//!
//! Absent values render as an em dash placeholder.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Shown wherever a value is missing
pub const PLACEHOLDER: &str = "—";

pub const ICON_RAIN: &str = "🌧️";
pub const ICON_SHOWERS: &str = "🌦️";
pub const ICON_SUN: &str = "☀️";

/// Round half towards positive infinity (2.5 -> 3, -2.5 -> -2)
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a whole number for labels
#[must_use]
pub fn round_label(value: f64) -> i64 {
    round_half_up(value) as i64
}

#[must_use]
pub fn temp(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{}°C", round_label(v)))
}

#[must_use]
pub fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{}%", round_label(v)))
}

#[must_use]
pub fn mm(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.1} mm"))
}

/// Wind speed as reported, in m/s
#[must_use]
pub fn wind(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v} m/s"))
}

/// Raw percentage as reported (no rounding)
#[must_use]
pub fn raw_pct(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v}%"))
}

/// UV index as reported
#[must_use]
pub fn plain(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

/// "05:42"
#[must_use]
pub fn time(value: Option<DateTime<FixedOffset>>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |dt| dt.format("%H:%M").to_string())
}

/// "Mon, May 6"
#[must_use]
pub fn day(value: Option<NaiveDate>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |d| d.format("%a, %b %-d").to_string(),
    )
}

/// "Monday, 06 May 2024"
#[must_use]
pub fn date_nice(value: Option<DateTime<FixedOffset>>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |dt| dt.format("%A, %d %b %Y").to_string(),
    )
}

/// "Mon"
#[must_use]
pub fn short_day(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |d| d.format("%a").to_string())
}

/// "05/06", used for chart axis labels
#[must_use]
pub fn month_day(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |d| d.format("%m/%d").to_string())
}

/// "+0.12" for positive values, plain otherwise
#[must_use]
pub fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Condition icon from the rain figures of a day
#[must_use]
pub fn icon_for(pop: Option<f64>, rain_mm: Option<f64>) -> &'static str {
    if rain_mm.unwrap_or(0.0) > 0.1 {
        return ICON_RAIN;
    }
    if pop.unwrap_or(0.0) >= 60.0 {
        return ICON_SHOWERS;
    }
    ICON_SUN
}

/// Capitalise the first character of every word
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_word = false;
    for c in text.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}
