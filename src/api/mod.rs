//! JSON/SVG API served under `/api`

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    advisory::{self, Callouts, DailyAdvisory},
    chart::{ChartGeometry, ChartLayout, svg},
    config::SkySenseConfig,
    dashboard::{Dashboard, DashboardView},
    locations::{self, CatalogView, LocationSelection},
    models::{DailyForecast, dates},
    provider::WeatherSource,
};

type Session = Arc<Mutex<Dashboard>>;

/// Shared handler state. Each catalog city keeps its own dashboard so a
/// failed refresh still serves the last good records for that city.
/// Free-text queries get a one-off dashboard and are never cached.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn WeatherSource>,
    layout: ChartLayout,
    forecast_days: usize,
    default_city: String,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl AppState {
    pub fn new(source: Arc<dyn WeatherSource>, config: &SkySenseConfig) -> Self {
        Self {
            source,
            layout: config.chart.layout(),
            forecast_days: config.dashboard.forecast_days as usize,
            default_city: config.dashboard.default_city.clone(),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of cities with a cached dashboard
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn new_dashboard(&self, selection: LocationSelection) -> Session {
        Arc::new(Mutex::new(
            Dashboard::new(self.source.clone(), selection).with_forecast_days(self.forecast_days),
        ))
    }

    // the map lock is released before the caller refreshes
    async fn session(&self, query: &str) -> Session {
        let Some(selection) = locations::find_by_query(query) else {
            return self.new_dashboard(locations::selection_for_query(query));
        };
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(selection.query.clone())
            .or_insert_with(|| self.new_dashboard(selection))
            .clone()
    }

    async fn dashboard_view(&self, city: Option<&str>) -> DashboardView {
        let query = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.default_city.as_str());

        let session = self.session(query).await;
        let mut dashboard = session.lock().await;
        if let Err(e) = dashboard.refresh().await {
            warn!(city = %dashboard.selection().query, error = %e, "Serving dashboard with stale data");
        }
        dashboard.view(&self.layout)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/chart.svg", get(get_chart_svg))
        .route("/locations", get(get_locations))
        .route("/advisory", post(post_advisory))
        .route("/chart", post(post_chart))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CityParams {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub region: Option<String>,
    pub province: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdvisoryRequest {
    #[serde(default)]
    pub day: Option<DailyForecast>,
    #[serde(default)]
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub advisory: DailyAdvisory,
    pub callouts: Callouts,
    pub messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub temps: Vec<f64>,
    #[serde(default)]
    pub rains: Vec<f64>,
    /// Dates in any accepted encoding; unreadable entries render as a placeholder
    #[serde(default)]
    pub labels: Vec<Value>,
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<CityParams>,
) -> Json<DashboardView> {
    Json(state.dashboard_view(params.city.as_deref()).await)
}

async fn get_chart_svg(
    State(state): State<AppState>,
    Query(params): Query<CityParams>,
) -> impl IntoResponse {
    let view = state.dashboard_view(params.city.as_deref()).await;
    let geometry = view.chart.unwrap_or_default();
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg::render(&geometry, &state.layout),
    )
}

async fn get_locations(Query(params): Query<LocationParams>) -> Json<CatalogView> {
    Json(locations::catalog_view(
        params.region.as_deref(),
        params.province.as_deref(),
        params.search.as_deref(),
    ))
}

async fn post_advisory(Json(request): Json<AdvisoryRequest>) -> Json<AdvisoryResponse> {
    let advisory = advisory::advise(request.day.as_ref(), request.index);
    let callouts = request
        .day
        .as_ref()
        .map(Callouts::for_day)
        .unwrap_or_default();
    debug!(level = %advisory.level, "Advisory requested");

    Json(AdvisoryResponse {
        messages: callouts.messages(),
        advisory,
        callouts,
    })
}

async fn post_chart(
    State(state): State<AppState>,
    Json(request): Json<ChartRequest>,
) -> Json<ChartGeometry> {
    let labels: Vec<_> = request.labels.iter().map(dates::parse_date).collect();
    Json(state.layout.normalize(&request.temps, &request.rains, &labels))
}
