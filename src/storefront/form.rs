use serde_json::Value;

use crate::{dto::plants::CreatePlantRequest, response::FieldError};

/// Checks the add-plant form before it is submitted. Only the required
/// fields are looked at; everything else is left to the server.
pub fn check_new_plant(request: &CreatePlantRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        errors.push(FieldError::new("name", "Plant name is required"));
    }

    let price = match &request.price {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    if !price.is_some_and(|p| p > 0.0) {
        errors.push(FieldError::new("price", "Valid price is required"));
    }

    let has_category = match &request.categories {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::String(name)) => !name.is_empty(),
        _ => false,
    };
    if !has_category {
        errors.push(FieldError::new("categories", "At least one category is required"));
    }

    if request.image.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("image", "Please select an image"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn complete_form_passes() {
        let request = CreatePlantRequest {
            name: Some("Areca Palm".into()),
            price: Some(json!("799")),
            categories: Some(json!(["Indoor"])),
            image: Some("https://images.example.com/areca.jpg".into()),
            ..Default::default()
        };
        assert!(check_new_plant(&request).is_empty());
    }

    #[test]
    fn zero_price_and_missing_fields_are_flagged() {
        let request = CreatePlantRequest {
            name: Some("  ".into()),
            price: Some(json!(0)),
            categories: Some(json!([])),
            ..Default::default()
        };
        let messages: Vec<_> = check_new_plant(&request)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Plant name is required",
                "Valid price is required",
                "At least one category is required",
                "Please select an image",
            ]
        );
    }
}
