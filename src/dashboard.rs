//! Dashboard orchestration
//!
//! Holds the selected location and the last good provider records, and
//! derives every view from scratch. A failed fetch only sets the error text;
//! previously fetched records stay in place.

use crate::advisory::{self, Callouts, DailyAdvisory};
use crate::chart::{ChartGeometry, ChartLayout};
use crate::format::{self, PLACEHOLDER};
use crate::locations::LocationSelection;
use crate::models::{TrendDirection, WeatherAnalytics, WeatherSummary};
use crate::provider::WeatherSource;
use crate::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Day cards shown with an advisory when not configured
pub const DEFAULT_FORECAST_DAYS: usize = 5;

pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    selection: LocationSelection,
    forecast_days: usize,
    summary: Option<WeatherSummary>,
    analytics: Option<WeatherAnalytics>,
    error: Option<String>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn WeatherSource>, selection: LocationSelection) -> Self {
        Self {
            source,
            selection,
            forecast_days: DEFAULT_FORECAST_DAYS,
            summary: None,
            analytics: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_forecast_days(mut self, days: usize) -> Self {
        self.forecast_days = days;
        self
    }

    #[must_use]
    pub fn selection(&self) -> &LocationSelection {
        &self.selection
    }

    #[must_use]
    pub fn summary(&self) -> Option<&WeatherSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn analytics(&self) -> Option<&WeatherAnalytics> {
        self.analytics.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Change location. Held records stay until the next refresh replaces them.
    pub fn select(&mut self, selection: LocationSelection) {
        info!(location = %selection.display, "Location selected");
        self.selection = selection;
    }

    /// Fetch summary and analytics concurrently.
    ///
    /// Each successful fetch replaces its own record. The first failure is
    /// returned and its message kept for display.
    #[instrument(skip(self), fields(city = %self.selection.query))]
    pub async fn refresh(&mut self) -> Result<()> {
        let query = self.selection.query.clone();
        let (summary, analytics) = futures::join!(
            self.source.fetch_summary(&query),
            self.source.fetch_analytics(&query)
        );

        let mut first_error = None;
        match summary {
            Ok(summary) => self.summary = summary,
            Err(e) => {
                warn!(error = %e, "Failed to fetch weather summary");
                first_error.get_or_insert(e);
            }
        }
        match analytics {
            Ok(analytics) => self.analytics = analytics,
            Err(e) => {
                warn!(error = %e, "Failed to fetch analytics");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
            None => {
                self.error = None;
                Ok(())
            }
        }
    }

    /// Derive the full view from the held records
    #[must_use]
    pub fn view(&self, layout: &ChartLayout) -> DashboardView {
        let empty = WeatherSummary::default();
        let summary = self.summary.as_ref().unwrap_or(&empty);

        DashboardView {
            location: self.selection.display.clone(),
            query: self.selection.query.clone(),
            hero: Hero::from_summary(summary, &self.selection),
            metrics: quick_metrics(summary),
            highlights: highlights(summary),
            days: day_cards(summary, self.forecast_days),
            chart: chart(summary, layout),
            analytics: self.analytics.as_ref().map(AnalyticsPanel::from_analytics),
            error: self.error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub location: String,
    pub query: String,
    pub hero: Hero,
    pub metrics: Vec<Metric>,
    pub highlights: Vec<Metric>,
    pub days: Vec<DayCard>,
    pub chart: Option<ChartGeometry>,
    pub analytics: Option<AnalyticsPanel>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub city: String,
    pub date: String,
    pub temperature: String,
    pub high: String,
    pub low: String,
    pub icon: String,
    pub description: String,
    pub feels_like: String,
}

impl Hero {
    fn from_summary(summary: &WeatherSummary, selection: &LocationSelection) -> Self {
        let current = &summary.current;
        let today = summary.today();
        Self {
            city: summary
                .city
                .clone()
                .unwrap_or_else(|| selection.display.clone()),
            date: format::date_nice(current.dt),
            temperature: format::temp(current.temp_c),
            high: format::temp(today.and_then(|d| d.temp_max)),
            low: format::temp(today.and_then(|d| d.temp_min)),
            icon: format::icon_for(today.and_then(|d| d.pop), today.and_then(|d| d.rain_mm))
                .to_string(),
            description: current
                .description
                .as_deref()
                .map_or_else(|| PLACEHOLDER.to_string(), format::title_case),
            feels_like: format::temp(current.feels_like),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub detail: Option<String>,
}

impl Metric {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

fn quick_metrics(summary: &WeatherSummary) -> Vec<Metric> {
    let current = &summary.current;
    vec![
        Metric::new("Sunrise", format::time(current.sunrise)),
        Metric::new("Sunset", format::time(current.sunset)),
        Metric::new("Wind", format::wind(current.wind_speed)),
        Metric::new("Humidity", format::raw_pct(current.humidity)),
    ]
}

fn highlights(summary: &WeatherSummary) -> Vec<Metric> {
    let current = &summary.current;
    let today = summary.today();
    vec![
        Metric::new("Chance of rain", format::pct(today.and_then(|d| d.pop)))
            .with_detail(format::mm(today.and_then(|d| d.rain_mm))),
        Metric::new("UV index", format::plain(current.uvi)),
        Metric::new("Wind", format::wind(current.wind_speed)),
        Metric::new("Humidity", format::raw_pct(current.humidity)),
    ]
}

/// One day of the outlook with its advisory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub date: String,
    pub icon: String,
    pub high: String,
    pub low: String,
    pub rain: String,
    pub advisory: DailyAdvisory,
    pub callouts: Vec<String>,
}

fn day_cards(summary: &WeatherSummary, count: usize) -> Vec<DayCard> {
    summary
        .daily
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, day)| DayCard {
            date: format::day(day.date),
            icon: format::icon_for(day.pop, day.rain_mm).to_string(),
            high: format::temp(day.temp_max),
            low: format::temp(day.temp_min),
            rain: format::pct(day.pop),
            advisory: advisory::advise(Some(day), index),
            callouts: Callouts::for_day(day).messages(),
        })
        .collect()
}

/// Chart over the full outlook; missing values plot as zero
fn chart(summary: &WeatherSummary, layout: &ChartLayout) -> Option<ChartGeometry> {
    let temps: Vec<f64> = summary.daily.iter().map(|d| d.temp_max.unwrap_or(0.0)).collect();
    let rains: Vec<f64> = summary.daily.iter().map(|d| d.pop.unwrap_or(0.0)).collect();
    let labels: Vec<_> = summary.daily.iter().map(|d| d.date).collect();

    let geometry = layout.normalize(&temps, &rains, &labels);
    (!geometry.is_empty()).then_some(geometry)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RainIntensity {
    Low,
    Moderate,
    High,
}

impl RainIntensity {
    #[must_use]
    pub fn from_probability(pop: f64) -> Self {
        if pop > 70.0 {
            Self::High
        } else if pop > 40.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RainOutlook {
    pub probability: i64,
    pub intensity: RainIntensity,
}

/// Analytics as displayed, nothing recomputed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsPanel {
    pub confidence: String,
    pub trend: TrendDirection,
    pub trend_badge: String,
    pub slope: String,
    pub temperature_outlook: Vec<i64>,
    pub rain_trend: TrendDirection,
    pub rain_outlook: Vec<RainOutlook>,
    pub avg_rain_prob: String,
    pub high_risk_days: usize,
    pub insights: Vec<String>,
    pub footer: String,
}

impl AnalyticsPanel {
    #[must_use]
    pub fn from_analytics(analytics: &WeatherAnalytics) -> Self {
        let temperature = &analytics.predictions.temperature;
        let rainfall = &analytics.predictions.rainfall;
        let history = &analytics.historical_summary;
        let trend = TrendDirection::parse(temperature.trend.as_deref());

        Self {
            confidence: format::pct(Some(analytics.analytics_confidence.temperature.unwrap_or(0.0))),
            trend,
            trend_badge: trend.badge().to_string(),
            slope: temperature
                .slope
                .map_or_else(|| PLACEHOLDER.to_string(), |s| format!("{}°C/day", format::signed(s))),
            temperature_outlook: temperature
                .next_7_days
                .iter()
                .map(|t| format::round_label(*t))
                .collect(),
            rain_trend: TrendDirection::parse(rainfall.trend.as_deref()),
            rain_outlook: rainfall
                .next_7_days
                .iter()
                .map(|p| RainOutlook {
                    probability: format::round_label(*p),
                    intensity: RainIntensity::from_probability(*p),
                })
                .collect(),
            avg_rain_prob: format::pct(history.avg_rain_prob),
            high_risk_days: rainfall.high_risk_days.len(),
            insights: analytics.insights.clone(),
            footer: format!(
                "Model: {} • Analyzed {} days • σ={}°C",
                analytics.regression_metrics.model.as_deref().unwrap_or(PLACEHOLDER),
                history
                    .days_analyzed
                    .map_or_else(|| PLACEHOLDER.to_string(), |d| d.to_string()),
                format::plain(history.temperature_std),
            ),
        }
    }
}
