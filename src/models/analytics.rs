//! Pre-computed analytics record (regression trends and predictions)
//!
//! Nothing here is recomputed locally; the values are shown as received.

use super::dates::lenient_f64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherAnalytics {
    #[serde(default)]
    pub analytics_confidence: AnalyticsConfidence,
    #[serde(default)]
    pub predictions: Predictions,
    #[serde(default)]
    pub historical_summary: HistoricalSummary,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub regression_metrics: RegressionMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfidence {
    /// Confidence of the temperature model, percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    #[serde(default)]
    pub temperature: TemperaturePrediction,
    #[serde(default)]
    pub rainfall: RainfallPrediction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePrediction {
    #[serde(default)]
    pub trend: Option<String>,
    /// °C per day
    #[serde(default, deserialize_with = "lenient_f64")]
    pub slope: Option<f64>,
    #[serde(default)]
    pub next_7_days: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RainfallPrediction {
    #[serde(default)]
    pub trend: Option<String>,
    /// Probability of rain per day, percent
    #[serde(default)]
    pub next_7_days: Vec<f64>,
    /// Opaque entries; only the count is displayed
    #[serde(default)]
    pub high_risk_days: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_rain_prob: Option<f64>,
    #[serde(default)]
    pub days_analyzed: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature_std: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    #[serde(default)]
    pub model: Option<String>,
}

/// Direction of a predicted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl TrendDirection {
    /// Anything other than "increasing"/"decreasing" reads as stable
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("increasing") => Self::Increasing,
            Some(s) if s.eq_ignore_ascii_case("decreasing") => Self::Decreasing,
            _ => Self::Stable,
        }
    }

    #[must_use]
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Increasing => "INCREASING",
            Self::Decreasing => "DECREASING",
            Self::Stable => "STABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some("increasing"), TrendDirection::Increasing)]
    #[case(Some("Decreasing"), TrendDirection::Decreasing)]
    #[case(Some("flat"), TrendDirection::Stable)]
    #[case(None, TrendDirection::Stable)]
    fn test_trend_parse(#[case] raw: Option<&str>, #[case] expected: TrendDirection) {
        assert_eq!(TrendDirection::parse(raw), expected);
    }

    #[test]
    fn test_analytics_parses_nested_payload() {
        let analytics: WeatherAnalytics = serde_json::from_value(json!({
            "analytics_confidence": { "temperature": 87 },
            "predictions": {
                "temperature": { "trend": "increasing", "slope": 0.12, "next_7_days": [30.1, 30.4] },
                "rainfall": { "trend": "stable", "next_7_days": [45, 72], "high_risk_days": ["2024-05-08"] }
            },
            "historical_summary": { "avg_rain_prob": 41.6, "days_analyzed": 30, "temperature_std": 1.3 },
            "insights": ["Warming trend"],
            "regression_metrics": { "model": "LinearRegression" }
        }))
        .unwrap();

        assert_eq!(analytics.analytics_confidence.temperature, Some(87.0));
        assert_eq!(analytics.predictions.temperature.next_7_days.len(), 2);
        assert_eq!(analytics.predictions.rainfall.high_risk_days.len(), 1);
        assert_eq!(analytics.historical_summary.days_analyzed, Some(30));
        assert_eq!(analytics.regression_metrics.model.as_deref(), Some("LinearRegression"));
    }
}
