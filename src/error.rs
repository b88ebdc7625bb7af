//! Error types and handling for the SkySense dashboard

use thiserror::Error;

/// Main error type for the SkySense dashboard
#[derive(Error, Debug)]
pub enum SkySenseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider communication errors (transport, retries exhausted)
    #[error("API error: {message}")]
    Api { message: String },

    /// Provider answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkySenseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn http<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkySenseError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            SkySenseError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            // the dashboard shows the provider's own status line
            SkySenseError::Http { .. } => self.to_string(),
            SkySenseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for SkySenseError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::http(status.as_u16(), err.to_string()),
            None => Self::api(err.to_string()),
        }
    }
}

impl From<reqwest_middleware::Error> for SkySenseError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(inner) => inner.into(),
            reqwest_middleware::Error::Middleware(inner) => Self::api(inner.to_string()),
        }
    }
}

impl From<url::ParseError> for SkySenseError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid provider URL: {err}"))
    }
}

impl From<serde_json::Error> for SkySenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::api(format!("Invalid data received from the weather service: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = SkySenseError::config("missing base url");
        assert!(matches!(config_err, SkySenseError::Config { .. }));

        let api_err = SkySenseError::api("connection failed");
        assert!(matches!(api_err, SkySenseError::Api { .. }));

        let http_err = SkySenseError::http(503, "upstream down");
        assert!(matches!(http_err, SkySenseError::Http { status: 503, .. }));
    }

    #[test]
    fn test_http_error_message_matches_status_line() {
        let err = SkySenseError::http(404, "city not found");
        assert_eq!(err.to_string(), "HTTP 404: city not found");
        assert_eq!(err.user_message(), "HTTP 404: city not found");
    }

    #[test]
    fn test_user_messages() {
        let config_err = SkySenseError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = SkySenseError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let io_err = SkySenseError::from(std::io::Error::other("disk full"));
        assert!(io_err.user_message().contains("File operation failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SkySenseError = io_err.into();
        assert!(matches!(err, SkySenseError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SkySenseError = json_err.into();
        assert!(matches!(err, SkySenseError::Api { .. }));
    }
}
