use axum::{Json, Router, http::StatusCode, http::Uri, routing::get};

use crate::{response::ApiResponse, state::AppState};

pub mod categories;
pub mod doc;
pub mod health;
pub mod params;
pub mod plants;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/plants", plants::router())
        .nest("/categories", categories::router())
}

/// Full application: health, `/api`, docs and the not-found fallback.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<()>>) {
    let body = ApiResponse::failure("Route not found").with_message(uri.path().to_string());
    (StatusCode::NOT_FOUND, Json(body))
}
