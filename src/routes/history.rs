//! Search history endpoints.
//!
//! - GET    /api/weather/history
//! - DELETE /api/weather/history/:id

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::City;

/// Confirmation returned after a delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: String,
}

/// List previously searched cities.
#[utoipa::path(
    get,
    path = "/api/weather/history",
    tag = "History",
    responses(
        (status = 200, description = "Saved cities in insertion order", body = Vec<City>),
    )
)]
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<City>> {
    Json(state.history.list().await)
}

/// Remove a city from the search history. Unknown ids are ignored.
#[utoipa::path(
    delete,
    path = "/api/weather/history/{id}",
    tag = "History",
    params(
        ("id" = String, Path, description = "City id"),
    ),
    responses(
        (status = 200, description = "City removed", body = DeleteResponse),
        (status = 500, description = "History file could not be written", body = ErrorResponse),
    )
)]
pub async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.history.remove(&id).await?;
    Ok(Json(DeleteResponse {
        success: "Removed city from search history".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use wiremock::MockServer;

    use crate::routes::api_router;
    use crate::routes::test_support::{body_json, state_for};

    #[tokio::test]
    async fn test_list_history_empty() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let resp = api_router(state_for(&server.uri(), &dir))
            .oneshot(
                Request::builder()
                    .uri("/api/weather/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_delete_history() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(&server.uri(), &dir);
        let history = state.history.clone();

        let tokyo = history.add("Tokyo").await.unwrap();
        history.add("Seoul").await.unwrap();

        let app = api_router(state);
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/weather/history/{}", tokyo.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await["success"],
            "Removed city from search history"
        );

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/weather/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "Seoul");
    }
}
