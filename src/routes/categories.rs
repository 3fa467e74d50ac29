use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    error::AppResult,
    models::{CategoryCount, CategoryStats},
    response::ApiResponse,
    routes::params::PopularQuery,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/popular", get(popular_categories))
        .route("/{category}/stats", get(category_stats))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories in use with plant counts", body = ApiResponse<Vec<CategoryCount>>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryCount>>>> {
    let resp = category_service::list_categories(&state)
        .await
        .map_err(|e| e.during("Failed to fetch categories"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/popular",
    params(PopularQuery),
    responses(
        (status = 200, description = "Most used categories", body = ApiResponse<Vec<CategoryCount>>),
    ),
    tag = "Categories"
)]
pub async fn popular_categories(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> AppResult<Json<ApiResponse<Vec<CategoryCount>>>> {
    let resp = category_service::popular_categories(&state, query)
        .await
        .map_err(|e| e.during("Failed to fetch popular categories"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/{category}/stats",
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Statistics for one category", body = ApiResponse<CategoryStats>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn category_stats(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryStats>>> {
    let resp = category_service::category_stats(&state, &category)
        .await
        .map_err(|e| e.during("Failed to fetch category statistics"))?;
    Ok(Json(resp))
}
