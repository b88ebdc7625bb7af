//! Data models for the SkySense dashboard
//!
//! Records delivered by the weather/analytics provider, organized by concern:
//! - Forecast: current conditions and the daily outlook
//! - Analytics: pre-computed trends and predictions
//! - Dates: lenient decoding of the provider's date encodings

pub mod analytics;
pub mod dates;
pub mod forecast;

pub use analytics::{TrendDirection, WeatherAnalytics};
pub use forecast::{CurrentConditions, DailyForecast, WeatherSummary};
