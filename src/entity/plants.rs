use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{CareLevel, Sunlight, Watering, unique_categories};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub categories: Vec<String>,
    pub in_stock: bool,
    pub image: String,
    pub description: Option<String>,
    pub scientific_name: Option<String>,
    pub care_level: CareLevel,
    pub sunlight: Sunlight,
    pub watering: Watering,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // Categories are stored as a set regardless of the write path.
        if let Set(categories) = &self.categories {
            let unique = unique_categories(categories.clone());
            self.categories = Set(unique);
        }
        if !insert {
            self.updated_at = Set(Utc::now().fixed_offset());
        }
        Ok(self)
    }
}
