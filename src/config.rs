//! Configuration management for the SkySense dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkySenseError;
use crate::chart::ChartLayout;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the SkySense dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkySenseConfig {
    /// Weather/analytics provider configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Dashboard defaults
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Chart geometry
    #[serde(default)]
    pub chart: ChartConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the weather/analytics service
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_api_max_retries")]
    pub max_retries: u32,
}

/// Dashboard defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Location query used when none is selected
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Number of day cards carrying an outfit advisory
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Chart geometry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: f64,
    #[serde(default = "default_chart_height")]
    pub height: f64,
    /// Margin on every side of the plotting area
    #[serde(default = "default_chart_padding")]
    pub padding: f64,
    /// Number of vertical tick intervals (ticks = y_ticks + 1)
    #[serde(default = "default_chart_y_ticks")]
    pub y_ticks: u32,
    /// Bar width as a fraction of the per-sample slot
    #[serde(default = "default_chart_bar_fraction")]
    pub bar_fraction: f64,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory served for non-API paths
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    #[serde(default = "default_body_limit_kb")]
    pub body_limit_kb: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_api_timeout() -> u32 {
    30
}

fn default_api_max_retries() -> u32 {
    3
}

fn default_city() -> String {
    crate::locations::DEFAULT_CITY_QUERY.to_string()
}

fn default_forecast_days() -> u32 {
    5
}

fn default_chart_width() -> f64 {
    1000.0
}

fn default_chart_height() -> f64 {
    260.0
}

fn default_chart_padding() -> f64 {
    36.0
}

fn default_chart_y_ticks() -> u32 {
    4
}

fn default_chart_bar_fraction() -> f64 {
    0.5
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_body_limit_kb() -> u32 {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: default_api_timeout(),
            max_retries: default_api_max_retries(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            padding: default_chart_padding(),
            y_ticks: default_chart_y_ticks(),
            bar_fraction: default_chart_bar_fraction(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
            request_timeout_seconds: default_request_timeout(),
            body_limit_kb: default_body_limit_kb(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ChartConfig {
    /// Chart layout used by the normalizer and the SVG renderer
    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        ChartLayout {
            width: self.width,
            height: self.height,
            padding: self.padding,
            y_ticks: self.y_ticks,
            bar_fraction: self.bar_fraction,
        }
    }
}

impl SkySenseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYSENSE_API__BASE_URL -> api.base_url
        builder = builder.add_source(
            Environment::with_prefix("SKYSENSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkySenseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skysense").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.base_url.is_empty() {
            self.api.base_url = default_api_base_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_api_timeout();
        }
        if self.dashboard.default_city.trim().is_empty() {
            self.dashboard.default_city = default_city();
        }
        if self.dashboard.forecast_days == 0 {
            self.dashboard.forecast_days = default_forecast_days();
        }
        if self.chart.y_ticks == 0 {
            self.chart.y_ticks = default_chart_y_ticks();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit_kb();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_chart()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(SkySenseError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.api.max_retries > 10 {
            return Err(SkySenseError::config("API max retries cannot exceed 10").into());
        }

        if !(1..=16).contains(&self.dashboard.forecast_days) {
            return Err(
                SkySenseError::config("Forecast days must be between 1 and 16").into(),
            );
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                SkySenseError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate chart geometry
    fn validate_chart(&self) -> Result<()> {
        let chart = &self.chart;

        if !(chart.padding >= 0.0 && chart.padding.is_finite()) {
            return Err(SkySenseError::config("Chart padding must be non-negative").into());
        }

        if chart.width <= chart.padding * 2.0 || chart.height <= chart.padding * 2.0 {
            return Err(SkySenseError::config(
                "Chart width and height must exceed twice the padding",
            )
            .into());
        }

        if !(chart.bar_fraction > 0.0 && chart.bar_fraction <= 1.0) {
            return Err(
                SkySenseError::config("Chart bar fraction must be in (0, 1]").into(),
            );
        }

        if chart.y_ticks > 20 {
            return Err(SkySenseError::config("Chart y ticks cannot exceed 20").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkySenseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkySenseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(
                SkySenseError::config("API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SkySenseConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.dashboard.forecast_days, 5);
        assert_eq!(config.chart.padding, 36.0);
        assert_eq!(config.chart.y_ticks, 4);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_city_is_a_catalog_city() {
        let config = SkySenseConfig::default();
        assert!(crate::locations::find_by_query(&config.dashboard.default_city).is_some());
        assert_ne!(config.dashboard.default_city, crate::provider::DEFAULT_CITY);
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SkySenseConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = SkySenseConfig::default();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_chart_padding() {
        let mut config = SkySenseConfig::default();
        config.chart.padding = 600.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("twice the padding"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_base_url() {
        let mut config = SkySenseConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_zero_values() {
        let mut config = SkySenseConfig::default();
        config.api.base_url.clear();
        config.dashboard.forecast_days = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.dashboard.forecast_days, 5);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://weather.example.com/api/\"\n\n[chart]\nwidth = 800.0\n"
        )
        .unwrap();

        let config = SkySenseConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.base_url, "https://weather.example.com/api/");
        assert_eq!(config.chart.width, 800.0);
        assert_eq!(config.chart.height, 260.0);
        assert_eq!(config.chart.layout().width, 800.0);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SkySenseConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("skysense"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
