use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::plants::{CreatePlantRequest, UpdatePlantRequest},
    models::{CareLevel, CategoryCount, CategoryStats, Plant, Sunlight, Watering},
    response::{ApiResponse, FieldError, PaginationMeta},
    routes::{categories, health, plants},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        plants::list_plants,
        plants::get_plant,
        plants::create_plant,
        plants::update_plant,
        plants::delete_plant,
        plants::toggle_stock,
        plants::plants_by_category,
        plants::search_plants,
        categories::list_categories,
        categories::popular_categories,
        categories::category_stats
    ),
    components(
        schemas(
            Plant,
            CareLevel,
            Sunlight,
            Watering,
            CategoryCount,
            CategoryStats,
            CreatePlantRequest,
            UpdatePlantRequest,
            FieldError,
            PaginationMeta,
            ApiResponse<Plant>,
            ApiResponse<Vec<Plant>>,
            ApiResponse<Vec<CategoryCount>>,
            ApiResponse<CategoryStats>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Plants", description = "Plant catalog endpoints"),
        (name = "Categories", description = "Category aggregation endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
