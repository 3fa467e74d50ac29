use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

/// Every category a plant may be filed under.
pub const PLANT_CATEGORIES: [&str; 36] = [
    "Indoor",
    "Outdoor",
    "Succulent",
    "Air Purifying",
    "Flowering",
    "Herb",
    "Home Decor",
    "Low Maintenance",
    "Hanging",
    "Climbing",
    "Medicinal",
    "Fragrant",
    "Pet Safe",
    "Large",
    "Small",
    "Desktop",
    "Statement Plant",
    "Tropical",
    "Colorful",
    "Edible",
    "Cactus",
    "Fast Growing",
    "Annual",
    "Shade Loving",
    "Premium",
    "Unique",
    "Rare",
    "Ground Cover",
    "Desert",
    "Trailing",
    "Winter Blooming",
    "Prayer Plant",
    "Tall",
    "Low Light",
    "Mediterranean",
    "Elegant",
];

pub fn is_known_category(category: &str) -> bool {
    PLANT_CATEGORIES.contains(&category)
}

/// Collapse repeated categories, keeping the first occurrence of each.
pub fn unique_categories(categories: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories {
        if !unique.contains(&category) {
            unique.push(category);
        }
    }
    unique
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CareLevel {
    #[sea_orm(string_value = "Easy")]
    Easy,
    #[default]
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "Hard")]
    Hard,
}

impl CareLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Sunlight {
    #[sea_orm(string_value = "Low")]
    Low,
    #[default]
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "Bright")]
    Bright,
}

impl Sunlight {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "Bright" => Some(Self::Bright),
            _ => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Watering {
    #[sea_orm(string_value = "Low")]
    Low,
    #[default]
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "High")]
    High,
}

impl Watering {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

/// A catalog entry. Serialized records also carry the derived
/// `availabilityStatus` and `formattedPrice`; both are ignored on input.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub categories: Vec<String>,
    pub in_stock: bool,
    pub image: String,
    pub description: Option<String>,
    pub scientific_name: Option<String>,
    pub care_level: CareLevel,
    pub sunlight: Sunlight,
    pub watering: Watering,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    pub fn availability_status(&self) -> &'static str {
        if self.in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        }
    }

    /// Price in rupees with thousands separators, e.g. `₹1,299.5`.
    pub fn formatted_price(&self) -> String {
        format_rupees(self.price)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlantRecord<'a> {
    id: Uuid,
    name: &'a str,
    price: f64,
    categories: &'a [String],
    in_stock: bool,
    image: &'a str,
    description: Option<&'a str>,
    scientific_name: Option<&'a str>,
    care_level: CareLevel,
    sunlight: Sunlight,
    watering: Watering,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    availability_status: &'static str,
    formatted_price: String,
}

impl Serialize for Plant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PlantRecord {
            id: self.id,
            name: &self.name,
            price: self.price,
            categories: &self.categories,
            in_stock: self.in_stock,
            image: &self.image,
            description: self.description.as_deref(),
            scientific_name: self.scientific_name.as_deref(),
            care_level: self.care_level,
            sunlight: self.sunlight,
            watering: self.watering,
            created_at: self.created_at,
            updated_at: self.updated_at,
            availability_status: self.availability_status(),
            formatted_price: self.formatted_price(),
        }
        .serialize(serializer)
    }
}

fn format_rupees(price: f64) -> String {
    let fixed = format!("{:.3}", price.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("₹{sign}{grouped}")
    } else {
        format!("₹{sign}{grouped}.{fraction}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub total_plants: i64,
    pub in_stock: i64,
    pub out_of_stock: i64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub care_levels: Vec<String>,
    pub sunlight_levels: Vec<String>,
    pub watering_levels: Vec<String>,
}
