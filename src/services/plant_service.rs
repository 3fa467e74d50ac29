use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    dto::plants::{CreatePlantRequest, PlantChanges, UpdatePlantRequest},
    entity::plants::{ActiveModel, Entity as Plants, Model as PlantModel},
    error::{AppError, AppResult},
    models::Plant,
    response::ApiResponse,
    routes::params::PlantQuery,
    services::plant_query,
    state::AppState,
};

pub async fn list_plants(state: &AppState, query: PlantQuery) -> AppResult<ApiResponse<Vec<Plant>>> {
    let filter = query.normalize();
    let page = plant_query::find_plants(&state.orm, &filter).await?;
    Ok(ApiResponse::success(page.items).with_pagination(page.pagination))
}

pub async fn get_plant(state: &AppState, id: &str) -> AppResult<ApiResponse<Plant>> {
    let plant = find_model(state, id).await?;
    Ok(ApiResponse::success(plant_from_entity(plant)))
}

pub async fn create_plant(
    state: &AppState,
    payload: CreatePlantRequest,
) -> AppResult<ApiResponse<Plant>> {
    let plant = payload.validate()?;
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(plant.name),
        price: Set(plant.price),
        categories: Set(plant.categories),
        in_stock: Set(plant.in_stock),
        image: Set(plant.image),
        description: Set(plant.description),
        scientific_name: Set(plant.scientific_name),
        care_level: Set(plant.care_level),
        sunlight: Set(plant.sunlight),
        watering: Set(plant.watering),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let plant = active.insert(&state.orm).await?;
    tracing::info!(plant_id = %plant.id, name = %plant.name, "plant created");

    Ok(ApiResponse::success(plant_from_entity(plant)).with_message("Plant created successfully"))
}

pub async fn update_plant(
    state: &AppState,
    id: &str,
    payload: UpdatePlantRequest,
) -> AppResult<ApiResponse<Plant>> {
    let changes = payload.validate()?;
    let existing = find_model(state, id).await?;

    let mut active: ActiveModel = existing.into();
    apply_changes(&mut active, changes);
    let plant = active.update(&state.orm).await?;
    tracing::info!(plant_id = %plant.id, "plant updated");

    Ok(ApiResponse::success(plant_from_entity(plant)).with_message("Plant updated successfully"))
}

pub async fn delete_plant(state: &AppState, id: &str) -> AppResult<ApiResponse<Plant>> {
    let existing = find_model(state, id).await?;

    let result = Plants::delete_by_id(existing.id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::plant_not_found());
    }
    tracing::info!(plant_id = %existing.id, "plant deleted");

    Ok(ApiResponse::success(plant_from_entity(existing)).with_message("Plant deleted successfully"))
}

pub async fn toggle_stock(state: &AppState, id: &str) -> AppResult<ApiResponse<Plant>> {
    let existing = find_model(state, id).await?;
    let in_stock = !existing.in_stock;

    let mut active: ActiveModel = existing.into();
    active.in_stock = Set(in_stock);
    let plant = plant_from_entity(active.update(&state.orm).await?);
    tracing::info!(plant_id = %plant.id, in_stock = plant.in_stock, "stock toggled");

    let message = format!("Stock status updated to {}", plant.availability_status());
    Ok(ApiResponse::success(plant).with_message(message))
}

pub async fn plants_by_category(
    state: &AppState,
    category: &str,
) -> AppResult<ApiResponse<Vec<Plant>>> {
    let plants = plant_query::find_by_category(&state.orm, category).await?;
    let count = plants.len();
    Ok(ApiResponse::success(plants).with_count(count))
}

pub async fn search_plants(state: &AppState, term: &str) -> AppResult<ApiResponse<Vec<Plant>>> {
    let plants = plant_query::search(&state.orm, term).await?;
    let count = plants.len();
    Ok(ApiResponse::success(plants)
        .with_count(count)
        .with_search_term(term))
}

/// Load a plant by its textual id; ids that are not UUIDs cannot exist.
async fn find_model(state: &AppState, id: &str) -> AppResult<PlantModel> {
    let id = Uuid::parse_str(id).map_err(|_| AppError::plant_not_found())?;
    Plants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(AppError::plant_not_found)
}

fn apply_changes(active: &mut ActiveModel, changes: PlantChanges) {
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(price) = changes.price {
        active.price = Set(price);
    }
    if let Some(categories) = changes.categories {
        active.categories = Set(categories);
    }
    if let Some(in_stock) = changes.in_stock {
        active.in_stock = Set(in_stock);
    }
    if let Some(image) = changes.image {
        active.image = Set(image);
    }
    if let Some(description) = changes.description {
        active.description = Set(Some(description));
    }
    if let Some(scientific_name) = changes.scientific_name {
        active.scientific_name = Set(Some(scientific_name));
    }
    if let Some(care_level) = changes.care_level {
        active.care_level = Set(care_level);
    }
    if let Some(sunlight) = changes.sunlight {
        active.sunlight = Set(sunlight);
    }
    if let Some(watering) = changes.watering {
        active.watering = Set(watering);
    }
}

pub(crate) fn plant_from_entity(model: PlantModel) -> Plant {
    Plant {
        id: model.id,
        name: model.name,
        price: model.price,
        categories: model.categories,
        in_stock: model.in_stock,
        image: model.image,
        description: model.description,
        scientific_name: model.scientific_name,
        care_level: model.care_level,
        sunlight: model.sunlight,
        watering: model.watering,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
