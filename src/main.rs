// City Weather API v0.1
use std::net::SocketAddr;
use std::path::Path;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod models;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::history::HistoryStore;
use services::openweather::OpenWeatherClient;

/// City Weather API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "City Weather API",
        version = "0.1.0",
        description = "Looks up a city through OpenWeather geocoding, fetches the \
            5-day / 3-hour forecast, and reduces it to today's conditions plus one \
            entry per future day (closest to noon). Keeps a history of searched cities.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "City weather lookup"),
        (name = "History", description = "Search history"),
    ),
    paths(
        routes::health::health_check,
        routes::weather::get_weather,
        routes::history::list_history,
        routes::history::delete_history,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::weather::WeatherRequest,
            routes::history::DeleteResponse,
            models::DayForecast,
            models::City,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "city_weather_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(api_base_url = %config.api_base_url, "Environment loaded");

    let client = match OpenWeatherClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let history = HistoryStore::new(&config.history_path);
    tracing::info!("Search history file: {}", history.path().display());

    let app_state = AppState { client, history };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    // Built client assets; unknown paths fall back to index.html for client-side routing
    let static_dir = Path::new(&config.static_dir);
    let static_files =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let app = Router::new()
        .merge(routes::api_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server running on port {}", config.port);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server terminated unexpectedly: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/weather"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/weather/history"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/weather/history/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/health"));
    }
}
