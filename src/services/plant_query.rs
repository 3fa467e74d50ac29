use sea_orm::sea_query::extension::postgres::{PgExpr, PgFunc};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use crate::{
    db::OrmConn,
    entity::plants::{Column, Entity as Plants},
    error::AppResult,
    models::Plant,
    response::PaginationMeta,
    routes::params::{PlantFilter, PlantSortBy, SortOrder},
    services::plant_service::plant_from_entity,
};

#[derive(Debug)]
pub struct PlantPage {
    pub items: Vec<Plant>,
    pub pagination: PaginationMeta,
}

/// Plants whose categories include `category` exactly.
pub fn category_condition(category: &str) -> SimpleExpr {
    Expr::val(category.to_string()).eq(PgFunc::any(Expr::col(Column::Categories)))
}

/// Case-insensitive substring match on name, description or scientific name.
pub fn search_condition(term: &str) -> Condition {
    let pattern = like_pattern(term);
    Condition::any()
        .add(Expr::col(Column::Name).ilike(pattern.clone()))
        .add(Expr::col(Column::Description).ilike(pattern.clone()))
        .add(Expr::col(Column::ScientificName).ilike(pattern))
}

/// Wrap `term` in `%` after escaping LIKE metacharacters with a backslash,
/// the Postgres default escape, so it matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub fn filter_condition(filter: &PlantFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(category) = filter.category.as_deref() {
        condition = condition.add(category_condition(category));
    }

    if let Some(search) = filter.search.as_deref() {
        condition = condition.add(search_condition(search));
    }

    if let Some(min_price) = filter.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = filter.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    if let Some(in_stock) = filter.in_stock {
        condition = condition.add(Column::InStock.eq(in_stock));
    }

    if let Some(care_level) = filter.care_level.as_deref() {
        condition = condition.add(Column::CareLevel.eq(care_level));
    }

    if let Some(sunlight) = filter.sunlight.as_deref() {
        condition = condition.add(Column::Sunlight.eq(sunlight));
    }

    if let Some(watering) = filter.watering.as_deref() {
        condition = condition.add(Column::Watering.eq(watering));
    }

    condition
}

/// Order by the requested field, then by id so equal keys page stably.
pub fn sorted(finder: Select<Plants>, sort_by: PlantSortBy, sort_order: SortOrder) -> Select<Plants> {
    let column = match sort_by {
        PlantSortBy::Name => Column::Name,
        PlantSortBy::Price => Column::Price,
        PlantSortBy::CreatedAt => Column::CreatedAt,
        PlantSortBy::UpdatedAt => Column::UpdatedAt,
        PlantSortBy::ScientificName => Column::ScientificName,
        PlantSortBy::CareLevel => Column::CareLevel,
        PlantSortBy::Sunlight => Column::Sunlight,
        PlantSortBy::Watering => Column::Watering,
        PlantSortBy::InStock => Column::InStock,
    };
    let order = match sort_order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };
    finder.order_by(column, order).order_by(Column::Id, Order::Asc)
}

pub async fn find_plants(orm: &OrmConn, filter: &PlantFilter) -> AppResult<PlantPage> {
    let finder = sorted(
        Plants::find().filter(filter_condition(filter)),
        filter.sort_by,
        filter.sort_order,
    );

    let page = match filter.limit {
        Some(limit) => {
            let total = finder.clone().count(orm).await?;
            let items = finder
                .offset(filter.offset())
                .limit(limit)
                .all(orm)
                .await?
                .into_iter()
                .map(plant_from_entity)
                .collect();
            PlantPage {
                items,
                pagination: PaginationMeta::paged(filter.page, limit, total),
            }
        }
        None => {
            let items: Vec<Plant> = finder
                .all(orm)
                .await?
                .into_iter()
                .map(plant_from_entity)
                .collect();
            let total = items.len() as u64;
            PlantPage {
                items,
                pagination: PaginationMeta::single_page(filter.page, total),
            }
        }
    };

    tracing::debug!(
        returned = page.items.len(),
        total = page.pagination.total_items,
        "plant query"
    );
    Ok(page)
}

/// Plants filed under `category`, name order.
pub async fn find_by_category(orm: &OrmConn, category: &str) -> AppResult<Vec<Plant>> {
    let finder = Plants::find().filter(category_condition(category));
    let items = sorted(finder, PlantSortBy::Name, SortOrder::Asc)
        .all(orm)
        .await?
        .into_iter()
        .map(plant_from_entity)
        .collect();
    Ok(items)
}

/// Plants matching the free-text `term`, name order.
pub async fn search(orm: &OrmConn, term: &str) -> AppResult<Vec<Plant>> {
    let finder = Plants::find().filter(search_condition(term));
    let items = sorted(finder, PlantSortBy::Name, SortOrder::Asc)
        .all(orm)
        .await?
        .into_iter()
        .map(plant_from_entity)
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;
    use crate::routes::params::PlantQuery;

    fn sql(filter: &PlantFilter) -> String {
        sorted(
            Plants::find().filter(filter_condition(filter)),
            filter.sort_by,
            filter.sort_order,
        )
        .build(DbBackend::Postgres)
        .to_string()
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("fern"), "%fern%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn no_filters_sort_by_name_then_id() {
        let statement = sql(&PlantQuery::default().normalize());
        assert!(!statement.contains(" AND "), "{statement}");
        assert!(!statement.contains("ILIKE"), "{statement}");
        assert!(
            statement.ends_with(r#"ORDER BY "plants"."name" ASC, "plants"."id" ASC"#),
            "{statement}"
        );
    }

    #[test]
    fn filters_are_combined_with_and() {
        let filter = PlantFilter {
            category: Some("Indoor".into()),
            search: Some("fern".into()),
            min_price: Some(100.0),
            max_price: Some(500.0),
            in_stock: Some(true),
            care_level: Some("Easy".into()),
            ..PlantFilter::default()
        };
        let statement = sql(&filter);
        assert!(statement.contains("'Indoor'"), "{statement}");
        assert!(statement.contains(r#"ANY("categories")"#), "{statement}");
        assert!(statement.contains(r#""name" ILIKE '%fern%'"#), "{statement}");
        assert!(statement.contains(r#""description" ILIKE '%fern%'"#), "{statement}");
        assert!(statement.contains(r#""scientific_name" ILIKE '%fern%'"#), "{statement}");
        assert!(!statement.contains("ESCAPE"), "{statement}");
        assert!(statement.contains(r#""price" >= 100"#), "{statement}");
        assert!(statement.contains(r#""price" <= 500"#), "{statement}");
        assert!(statement.contains(r#""in_stock" = TRUE"#), "{statement}");
        assert!(statement.contains(r#""care_level" = 'Easy'"#), "{statement}");
        assert!(statement.contains(" AND "), "{statement}");
        assert!(statement.contains(" OR "), "{statement}");
    }

    #[test]
    fn descending_sort_on_requested_field() {
        let filter = PlantFilter {
            sort_by: PlantSortBy::Price,
            sort_order: SortOrder::Desc,
            ..PlantFilter::default()
        };
        assert!(sql(&filter).ends_with(r#"ORDER BY "plants"."price" DESC, "plants"."id" ASC"#));
    }
}
