pub mod category_service;
pub mod plant_query;
pub mod plant_service;
