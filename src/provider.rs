//! HTTP client for the weather/analytics provider
//!
//! Requests go through `reqwest-middleware` with transient-failure retries.
//! A non-success status becomes [`SkySenseError::Http`]; an empty body is
//! `Ok(None)` rather than an error.

use crate::config::ApiConfig;
use crate::models::{WeatherAnalytics, WeatherSummary};
use crate::{Result, SkySenseError};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// City used when a caller does not name one. Provider-level fallback only;
/// the dashboard default lives in the config.
pub const DEFAULT_CITY: &str = "Bacolod,PH";
/// Days requested from the forecast endpoint by default
pub const DEFAULT_HORIZON: u32 = 7;

const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Source of the records the dashboard renders
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_summary(&self, city: &str) -> Result<Option<WeatherSummary>>;

    async fn fetch_analytics(&self, city: &str) -> Result<Option<WeatherAnalytics>>;
}

/// Optional filters for the time series endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeriesQuery {
    pub days: Option<u32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub struct ProviderClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl ProviderClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SkySenseError::config("API base URL is not configured"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("SkySense/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkySenseError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL; absent or empty parameters are left out.
    pub fn build_url(&self, path: &str, params: &[(&str, Option<String>)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?;

        let present: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(key, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((*key, v)),
                _ => None,
            })
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Option<T>> {
        let url = self.build_url(path, params)?;
        debug!(%url, "Provider request");
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let elapsed = start_time.elapsed();

        info!(
            path,
            status = status.as_u16(),
            "Provider responded in {:.3}s",
            elapsed.as_secs_f64()
        );
        if elapsed > SLOW_RESPONSE {
            warn!(path, "Slow provider response: {:.3}s", elapsed.as_secs_f64());
        }

        if !status.is_success() {
            let body = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(SkySenseError::http(status.as_u16(), body));
        }

        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text).map(Some).map_err(|e| {
            error!(path, error = %e, "Failed to parse provider response");
            SkySenseError::api(format!("Invalid response from {path}: {e}"))
        })
    }

    #[instrument(skip(self))]
    pub async fn weather_summary(&self, city: Option<&str>) -> Result<Option<WeatherSummary>> {
        self.get_json("weather/summary", &[("city", Some(city_or_default(city)))])
            .await
    }

    #[instrument(skip(self))]
    pub async fn metrics(&self, city: Option<&str>) -> Result<Option<Value>> {
        self.get_json("analytics/metrics", &[("city", Some(city_or_default(city)))])
            .await
    }

    #[instrument(skip(self))]
    pub async fn timeseries(&self, city: Option<&str>, query: &TimeSeriesQuery) -> Result<Option<Value>> {
        self.get_json(
            "analytics/timeseries",
            &[
                ("city", Some(city_or_default(city))),
                ("days", query.days.map(|d| d.to_string())),
                ("from", query.from.map(|d| d.to_string())),
                ("to", query.to.map(|d| d.to_string())),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn forecast(&self, city: Option<&str>, horizon: Option<u32>) -> Result<Option<Value>> {
        let horizon = horizon.unwrap_or(DEFAULT_HORIZON);
        self.get_json(
            "analytics/forecast",
            &[
                ("city", Some(city_or_default(city))),
                ("horizon", Some(horizon.to_string())),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn feature_importance(&self) -> Result<Option<Value>> {
        self.get_json("analytics/feature-importance", &[]).await
    }

    /// Combined analytics record
    #[instrument(skip(self))]
    pub async fn analytics(&self, city: Option<&str>) -> Result<Option<WeatherAnalytics>> {
        self.get_json("analytics/", &[("city", Some(city_or_default(city)))])
            .await
    }
}

#[async_trait]
impl WeatherSource for ProviderClient {
    async fn fetch_summary(&self, city: &str) -> Result<Option<WeatherSummary>> {
        self.weather_summary(Some(city)).await
    }

    async fn fetch_analytics(&self, city: &str) -> Result<Option<WeatherAnalytics>> {
        self.analytics(Some(city)).await
    }
}

fn city_or_default(city: Option<&str>) -> String {
    match city.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CITY.to_string(),
    }
}
