use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::plants::{CreatePlantRequest, UpdatePlantRequest},
    error::AppResult,
    models::Plant,
    response::ApiResponse,
    routes::params::PlantQuery,
    services::plant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plants).post(create_plant))
        .route(
            "/{id}",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
        .route("/{id}/toggle-stock", patch(toggle_stock))
        .route("/categories/{category}", get(plants_by_category))
        .route("/search/{term}", get(search_plants))
}

#[utoipa::path(
    get,
    path = "/api/plants",
    params(PlantQuery),
    responses(
        (status = 200, description = "Filtered, sorted and optionally paginated plants", body = ApiResponse<Vec<Plant>>),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Plants"
)]
pub async fn list_plants(
    State(state): State<AppState>,
    Query(query): Query<PlantQuery>,
) -> AppResult<Json<ApiResponse<Vec<Plant>>>> {
    let resp = plant_service::list_plants(&state, query)
        .await
        .map_err(|e| e.during("Failed to fetch plants"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/plants/{id}",
    params(
        ("id" = String, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Get plant", body = ApiResponse<Plant>),
        (status = 404, description = "Plant not found"),
    ),
    tag = "Plants"
)]
pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Plant>>> {
    let resp = plant_service::get_plant(&state, &id)
        .await
        .map_err(|e| e.during("Failed to fetch plant"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/plants",
    request_body = CreatePlantRequest,
    responses(
        (status = 201, description = "Plant created", body = ApiResponse<Plant>),
        (status = 400, description = "Validation error"),
    ),
    tag = "Plants"
)]
pub async fn create_plant(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlantRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Plant>>)> {
    let Json(payload) = payload?;
    let resp = plant_service::create_plant(&state, payload)
        .await
        .map_err(|e| e.during("Failed to create plant"))?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/plants/{id}",
    params(
        ("id" = String, Path, description = "Plant ID")
    ),
    request_body = UpdatePlantRequest,
    responses(
        (status = 200, description = "Plant updated", body = ApiResponse<Plant>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Plant not found"),
    ),
    tag = "Plants"
)]
pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePlantRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Plant>>> {
    let Json(payload) = payload?;
    let resp = plant_service::update_plant(&state, &id, payload)
        .await
        .map_err(|e| e.during("Failed to update plant"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/plants/{id}",
    params(
        ("id" = String, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Deleted plant", body = ApiResponse<Plant>),
        (status = 404, description = "Plant not found"),
    ),
    tag = "Plants"
)]
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Plant>>> {
    let resp = plant_service::delete_plant(&state, &id)
        .await
        .map_err(|e| e.during("Failed to delete plant"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/plants/{id}/toggle-stock",
    params(
        ("id" = String, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Stock flag flipped", body = ApiResponse<Plant>),
        (status = 404, description = "Plant not found"),
    ),
    tag = "Plants"
)]
pub async fn toggle_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Plant>>> {
    let resp = plant_service::toggle_stock(&state, &id)
        .await
        .map_err(|e| e.during("Failed to toggle stock status"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/plants/categories/{category}",
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Plants in category", body = ApiResponse<Vec<Plant>>),
    ),
    tag = "Plants"
)]
pub async fn plants_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Plant>>>> {
    let resp = plant_service::plants_by_category(&state, &category)
        .await
        .map_err(|e| e.during("Failed to fetch plants by category"))?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/plants/search/{term}",
    params(
        ("term" = String, Path, description = "Search term")
    ),
    responses(
        (status = 200, description = "Plants matching the term", body = ApiResponse<Vec<Plant>>),
    ),
    tag = "Plants"
)]
pub async fn search_plants(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Plant>>>> {
    let resp = plant_service::search_plants(&state, &term)
        .await
        .map_err(|e| e.during("Failed to search plants"))?;
    Ok(Json(resp))
}
