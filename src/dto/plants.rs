use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{CareLevel, Sunlight, Watering, is_known_category},
    response::FieldError,
};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Body of `POST /api/plants`. Every field is optional at the type level, and
/// `price`/`categories` accept any JSON, so missing or mistyped fields surface
/// as validation messages instead of a parse error.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A number, or a numeric string.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,
    /// A list of category names; a single name is accepted as a one-element list.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<String>>)]
    pub categories: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering: Option<String>,
}

/// Body of `PUT /api/plants/{id}`; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A number, or a numeric string.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,
    /// A list of category names; a single name is accepted as a one-element list.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<String>>)]
    pub categories: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlant {
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
}

/// An update request that passed validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub scientific_name: Option<String>,
    pub care_level: Option<CareLevel>,
    pub sunlight: Option<Sunlight>,
    pub watering: Option<Watering>,
}

impl CreatePlantRequest {
    pub fn validate(self) -> Result<NewPlant, AppError> {
        let mut checks = Checks::default();
        let name = checks.name(self.name, true);
        let price = checks.price(self.price, true);
        let categories = checks.categories(self.categories, true);
        let image = checks.image(self.image, true);
        let description = checks.description(self.description);
        let care_level = checks.choice("careLevel", self.care_level, CareLevel::parse);
        let sunlight = checks.choice("sunlight", self.sunlight, Sunlight::parse);
        let watering = checks.choice("watering", self.watering, Watering::parse);

        match (name, price, categories, image) {
            (Some(name), Some(price), Some(categories), Some(image)) if checks.is_clean() => {
                Ok(NewPlant {
                    name,
                    price,
                    categories,
                    in_stock: self.in_stock.unwrap_or(true),
                    image,
                    description,
                    scientific_name: trimmed(self.scientific_name),
                    care_level: care_level.unwrap_or_default(),
                    sunlight: sunlight.unwrap_or_default(),
                    watering: watering.unwrap_or_default(),
                })
            }
            _ => Err(checks.into_error()),
        }
    }
}

impl UpdatePlantRequest {
    pub fn validate(self) -> Result<PlantChanges, AppError> {
        let mut checks = Checks::default();
        let changes = PlantChanges {
            name: checks.name(self.name, false),
            price: checks.price(self.price, false),
            categories: checks.categories(self.categories, false),
            in_stock: self.in_stock,
            image: checks.image(self.image, false),
            description: checks.description(self.description),
            scientific_name: trimmed(self.scientific_name),
            care_level: checks.choice("careLevel", self.care_level, CareLevel::parse),
            sunlight: checks.choice("sunlight", self.sunlight, Sunlight::parse),
            watering: checks.choice("watering", self.watering, Watering::parse),
        };

        if checks.is_clean() {
            Ok(changes)
        } else {
            Err(checks.into_error())
        }
    }
}

/// Matches `^https?://.+`.
pub fn is_valid_image_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest.and_then(|r| r.chars().next()), Some(c) if c != '\n' && c != '\r')
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_error(self) -> AppError {
        AppError::Validation(self.errors)
    }

    fn name(&mut self, value: Option<String>, required: bool) -> Option<String> {
        let Some(value) = value else {
            if required {
                self.fail("name", "Plant name is required");
            }
            return None;
        };
        let name = value.trim().to_string();
        if name.is_empty() {
            self.fail("name", "Plant name is required");
            return None;
        }
        if name.chars().count() > NAME_MAX_CHARS {
            self.fail("name", "Plant name cannot exceed 100 characters");
            return None;
        }
        Some(name)
    }

    fn price(&mut self, value: Option<Value>, required: bool) -> Option<f64> {
        let price = match value {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().parse::<f64>().ok()),
            Some(_) => Some(None),
        };
        match price {
            None => {
                if required {
                    self.fail("price", "Price is required");
                }
                None
            }
            Some(Some(price)) if !price.is_finite() => {
                self.fail("price", "Price must be a number");
                None
            }
            Some(None) => {
                self.fail("price", "Price must be a number");
                None
            }
            Some(Some(price)) if price < 0.0 => {
                self.fail("price", "Price cannot be negative");
                None
            }
            Some(Some(price)) => Some(price),
        }
    }

    fn categories(&mut self, value: Option<Value>, required: bool) -> Option<Vec<String>> {
        let categories = match value {
            None | Some(Value::Null) if !required => return None,
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(name)) => vec![name],
            Some(Value::Array(items)) => {
                let before = self.errors.len();
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(name) => names.push(name),
                        other => self.fail("categories", format!("Invalid category: {other}")),
                    }
                }
                if self.errors.len() > before {
                    return None;
                }
                names
            }
            Some(_) => {
                self.fail("categories", "Categories must be a list of category names");
                return None;
            }
        };
        if categories.is_empty() {
            self.fail("categories", "At least one category is required");
            return None;
        }

        let before = self.errors.len();
        for category in categories.iter().filter(|c| !is_known_category(c)) {
            self.fail("categories", format!("Invalid category: {category}"));
        }
        if self.errors.len() > before {
            return None;
        }
        Some(categories)
    }

    fn image(&mut self, value: Option<String>, required: bool) -> Option<String> {
        let image = match value {
            None if !required => return None,
            None => String::new(),
            Some(image) => image,
        };
        if image.is_empty() {
            self.fail("image", "Plant image is required");
            return None;
        }
        if !is_valid_image_url(&image) {
            self.fail("image", "Image must be a valid URL");
            return None;
        }
        Some(image)
    }

    fn description(&mut self, value: Option<String>) -> Option<String> {
        let description = value.filter(|d| !d.is_empty())?;
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            self.fail(
                "description",
                "Description cannot exceed 500 characters",
            );
            return None;
        }
        Some(description)
    }

    fn choice<T>(
        &mut self,
        field: &str,
        value: Option<String>,
        parse: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let value = value?;
        let parsed = parse(&value);
        if parsed.is_none() {
            self.fail(field, format!("`{value}` is not a valid value for {field}"));
        }
        parsed
    }
}
