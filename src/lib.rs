//! `SkySense` - location-scoped weather dashboard
//!
//! This library turns provider weather records into a rule-based outfit
//! advisory and dual-axis chart geometry, and wraps them in the fetch,
//! orchestration and serving layers of the dashboard.

pub mod advisory;
pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod locations;
pub mod logging;
pub mod models;
pub mod provider;
pub mod report;
pub mod web;

// Re-export core types for public API
pub use advisory::{AdvisoryItem, AdvisoryLevel, Callouts, DailyAdvisory, advise};
pub use chart::{ChartGeometry, ChartLayout, normalize};
pub use config::SkySenseConfig;
pub use dashboard::{Dashboard, DashboardView};
pub use error::SkySenseError;
pub use locations::LocationSelection;
pub use models::{DailyForecast, WeatherAnalytics, WeatherSummary};
pub use provider::{ProviderClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkySenseError>;
