use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{Router, http::StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::SkySenseConfig;
use crate::provider::WeatherSource;

/// Full application: API under `/api`, static files for everything else
pub fn app(config: &SkySenseConfig, source: Arc<dyn WeatherSource>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let server = &config.server;
    Router::new()
        .nest("/api", api::router(AppState::new(source, config)))
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(RequestBodyLimitLayer::new(server.body_limit_kb as usize * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds.into()),
        ))
        .layer(cors)
}

pub async fn run(config: &SkySenseConfig, source: Arc<dyn WeatherSource>) -> Result<()> {
    let app = app(config, source);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
