//! Weather summary records as delivered by the provider

use super::dates::{lenient_date, lenient_datetime, lenient_f64};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day's forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar date of the forecast
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// Daily maximum temperature in °C
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp_max: Option<f64>,
    /// Daily minimum temperature in °C
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp_min: Option<f64>,
    /// Probability of precipitation, 0-100
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pop: Option<f64>,
    /// Expected rainfall in mm
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rain_mm: Option<f64>,
}

impl DailyForecast {
    #[must_use]
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_temps(mut self, temp_max: f64, temp_min: f64) -> Self {
        self.temp_max = Some(temp_max);
        self.temp_min = Some(temp_min);
        self
    }

    #[must_use]
    pub fn with_rain(mut self, pop: f64, rain_mm: f64) -> Self {
        self.pop = Some(pop);
        self.rain_mm = Some(rain_mm);
        self
    }
}

/// Current conditions block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub dt: Option<DateTime<FixedOffset>>,
    /// Temperature in °C
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp_c: Option<f64>,
    /// Apparent temperature in °C
    #[serde(default, deserialize_with = "lenient_f64")]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub sunrise: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub sunset: Option<DateTime<FixedOffset>>,
    /// Wind speed in m/s
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_speed: Option<f64>,
    /// Relative humidity in percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub humidity: Option<f64>,
    /// UV index
    #[serde(default, deserialize_with = "lenient_f64")]
    pub uvi: Option<f64>,
}

/// Weather summary: current conditions plus the daily outlook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub current: CurrentConditions,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

impl WeatherSummary {
    /// Today's record, if the outlook is non-empty
    #[must_use]
    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_parses_partial_payload() {
        let payload = json!({
            "city": "Bacolod",
            "current": { "temp_c": 29.4, "dt": "2024-05-06T09:00:00+08:00" },
            "daily": [
                { "date": "2024-05-06", "temp_max": 33, "temp_min": 26, "pop": 85, "rain_mm": 6.2 },
                { "date": "2024-05-07", "temp_max": null }
            ]
        });

        let summary: WeatherSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(summary.city.as_deref(), Some("Bacolod"));
        assert_eq!(summary.current.temp_c, Some(29.4));
        assert!(summary.current.sunrise.is_none());
        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.daily[0].temp_max, Some(33.0));
        assert_eq!(summary.daily[0].rain_mm, Some(6.2));
        assert!(summary.daily[1].temp_max.is_none());
        assert!(summary.daily[1].pop.is_none());
    }

    #[test]
    fn test_daily_forecast_tolerates_bad_fields() {
        let day: DailyForecast = serde_json::from_value(json!({
            "date": "not a date",
            "temp_max": "31.5",
            "pop": "n/a"
        }))
        .unwrap();

        assert!(day.date.is_none());
        assert_eq!(day.temp_max, Some(31.5));
        assert!(day.pop.is_none());
    }

    #[test]
    fn test_empty_object_is_empty_summary() {
        let summary: WeatherSummary = serde_json::from_value(json!({})).unwrap();
        assert!(summary.today().is_none());
    }
}
