use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw `GET /api/plants` query string. Values stay as text so that malformed
/// numbers are coerced instead of rejecting the request.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlantQuery {
    /// Page number, default 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Page size; all matching plants are returned when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Case-insensitive match on name, description or scientific name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    /// `true` for plants in stock, anything else for plants out of stock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering: Option<String>,
    /// name, price, createdAt, updatedAt, scientificName, careLevel, sunlight, watering, inStock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// asc or desc, default asc
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PopularQuery {
    /// Number of categories to return, default 10
    pub limit: Option<String>,
}

impl PopularQuery {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn limit(&self) -> u64 {
        positive(self.limit.as_deref()).unwrap_or(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlantSortBy {
    #[default]
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
    ScientificName,
    CareLevel,
    Sunlight,
    Watering,
    InStock,
}

impl PlantSortBy {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("price") => PlantSortBy::Price,
            Some("createdAt") => PlantSortBy::CreatedAt,
            Some("updatedAt") => PlantSortBy::UpdatedAt,
            Some("scientificName") => PlantSortBy::ScientificName,
            Some("careLevel") => PlantSortBy::CareLevel,
            Some("sunlight") => PlantSortBy::Sunlight,
            Some("watering") => PlantSortBy::Watering,
            Some("inStock") => PlantSortBy::InStock,
            _ => PlantSortBy::Name,
        }
    }
}

/// Typed, coerced form of [`PlantQuery`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlantFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub care_level: Option<String>,
    pub sunlight: Option<String>,
    pub watering: Option<String>,
    pub sort_by: PlantSortBy,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: Option<u64>,
}

impl PlantQuery {
    pub fn normalize(&self) -> PlantFilter {
        PlantFilter {
            category: non_empty(&self.category),
            search: non_empty(&self.search),
            min_price: number(self.min_price.as_deref()),
            max_price: number(self.max_price.as_deref()),
            in_stock: non_empty(&self.in_stock).map(|v| v == "true"),
            care_level: non_empty(&self.care_level),
            sunlight: non_empty(&self.sunlight),
            watering: non_empty(&self.watering),
            sort_by: PlantSortBy::parse(self.sort_by.as_deref()),
            sort_order: SortOrder::parse(self.sort_order.as_deref()),
            page: positive(self.page.as_deref()).unwrap_or(1),
            limit: positive(self.limit.as_deref()),
        }
    }
}

impl PlantFilter {
    /// Rows to skip, capped at [`MAX_BIND`] so a page far past the end just
    /// comes back empty.
    pub fn offset(&self) -> u64 {
        match self.limit {
            Some(limit) => self
                .page
                .saturating_sub(1)
                .checked_mul(limit)
                .map_or(MAX_BIND, |offset| offset.min(MAX_BIND)),
            None => 0,
        }
    }
}

/// Largest page, limit or offset the database accepts as a `BIGINT`.
pub const MAX_BIND: u64 = i64::MAX as u64;

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Whole numbers above zero, at most [`MAX_BIND`]; fractional input is truncated.
fn positive(value: Option<&str>) -> Option<u64> {
    number(value)
        .map(f64::trunc)
        .filter(|v| *v >= 1.0)
        .map(|v| (v as u64).min(MAX_BIND))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> PlantQuery {
        let mut q = PlantQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => q.page = value,
                "limit" => q.limit = value,
                "category" => q.category = value,
                "search" => q.search = value,
                "minPrice" => q.min_price = value,
                "maxPrice" => q.max_price = value,
                "inStock" => q.in_stock = value,
                "sortBy" => q.sort_by = value,
                "sortOrder" => q.sort_order = value,
                _ => unreachable!("unknown key {key}"),
            }
        }
        q
    }

    #[test]
    fn defaults_sort_by_name_ascending_without_limit() {
        let filter = PlantQuery::default().normalize();
        assert_eq!(filter.sort_by, PlantSortBy::Name);
        assert_eq!(filter.sort_order, SortOrder::Asc);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, None);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn page_and_limit_give_offset() {
        let filter = query(&[("page", "2"), ("limit", "10")]).normalize();
        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.offset(), 10);
    }

    #[test]
    fn malformed_numbers_are_coerced() {
        let filter = query(&[
            ("page", "abc"),
            ("limit", "0"),
            ("minPrice", "cheap"),
            ("maxPrice", " 500 "),
        ])
        .normalize();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, None);
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, Some(500.0));

        let negative = query(&[("page", "-3"), ("limit", "2.7")]).normalize();
        assert_eq!(negative.page, 1);
        assert_eq!(negative.limit, Some(2));
    }

    #[test]
    fn stock_flag_is_true_only_for_literal_true() {
        assert_eq!(query(&[("inStock", "true")]).normalize().in_stock, Some(true));
        assert_eq!(query(&[("inStock", "false")]).normalize().in_stock, Some(false));
        assert_eq!(query(&[("inStock", "yes")]).normalize().in_stock, Some(false));
        assert_eq!(PlantQuery::default().normalize().in_stock, None);
        assert_eq!(query(&[("inStock", "")]).normalize().in_stock, None);
    }

    #[test]
    fn huge_page_and_limit_are_clamped() {
        let filter = query(&[("page", "1e19"), ("limit", "10")]).normalize();
        assert_eq!(filter.page, MAX_BIND);
        assert_eq!(filter.offset(), MAX_BIND);

        let filter = query(&[("page", "1e18"), ("limit", "10")]).normalize();
        assert_eq!(filter.offset(), MAX_BIND);

        let filter = query(&[("limit", "1e19")]).normalize();
        assert_eq!(filter.limit, Some(MAX_BIND));
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn empty_strings_are_absent_filters() {
        let filter = query(&[("category", ""), ("search", "")]).normalize();
        assert_eq!(filter.category, None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_name() {
        let filter = query(&[("sortBy", "colour"), ("sortOrder", "DESC")]).normalize();
        assert_eq!(filter.sort_by, PlantSortBy::Name);
        assert_eq!(filter.sort_order, SortOrder::Asc);

        let filter = query(&[("sortBy", "price"), ("sortOrder", "desc")]).normalize();
        assert_eq!(filter.sort_by, PlantSortBy::Price);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn popular_limit_defaults_to_ten() {
        assert_eq!(PopularQuery::default().limit(), 10);
        assert_eq!(PopularQuery { limit: Some("3".into()) }.limit(), 3);
        assert_eq!(PopularQuery { limit: Some("zero".into()) }.limit(), 10);
    }
}
