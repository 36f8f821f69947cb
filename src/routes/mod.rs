pub mod health;
pub mod history;
pub mod weather;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::services::history::HistoryStore;
use crate::services::openweather::OpenWeatherClient;

/// Shared application state for the API endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: OpenWeatherClient,
    pub(crate) history: HistoryStore,
}

/// API routes (without static file serving or docs).
pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/weather", post(weather::get_weather))
        .route("/api/weather/history", get(history::list_history))
        .route("/api/weather/history/:id", delete(history::delete_history))
        .with_state(state)
}
