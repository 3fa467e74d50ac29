use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::{CategoryCount, CategoryStats},
    response::ApiResponse,
    routes::params::PopularQuery,
    state::AppState,
};

#[derive(Debug, sqlx::FromRow)]
struct CategoryCountRow {
    name: String,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryStatsRow {
    total_plants: i64,
    in_stock: i64,
    out_of_stock: i64,
    avg_price: Option<f64>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    care_levels: Vec<String>,
    sunlight_levels: Vec<String>,
    watering_levels: Vec<String>,
}

impl From<CategoryCountRow> for CategoryCount {
    fn from(row: CategoryCountRow) -> Self {
        CategoryCount {
            name: row.name,
            count: row.count,
        }
    }
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<CategoryCount>>> {
    let categories = category_counts(&state.pool).await?;
    let total = categories.len();
    Ok(ApiResponse::success(categories).with_total_categories(total))
}

pub async fn popular_categories(
    state: &AppState,
    query: PopularQuery,
) -> AppResult<ApiResponse<Vec<CategoryCount>>> {
    let categories = popular(&state.pool, query.limit()).await?;
    Ok(ApiResponse::success(categories))
}

pub async fn category_stats(
    state: &AppState,
    category: &str,
) -> AppResult<ApiResponse<CategoryStats>> {
    let stats = stats_for(&state.pool, category)
        .await?
        .ok_or_else(AppError::category_not_found)?;
    Ok(ApiResponse::success(stats))
}

/// Every category in use with the number of plants filed under it, by name.
pub async fn category_counts(pool: &DbPool) -> AppResult<Vec<CategoryCount>> {
    let rows = sqlx::query_as::<_, CategoryCountRow>(
        r#"
        SELECT category AS name, COUNT(*)::BIGINT AS count
        FROM plants, unnest(categories) AS category
        GROUP BY category
        ORDER BY category ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CategoryCount::from).collect())
}

/// The `limit` most used categories, busiest first.
pub async fn popular(pool: &DbPool, limit: u64) -> AppResult<Vec<CategoryCount>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = sqlx::query_as::<_, CategoryCountRow>(
        r#"
        SELECT category AS name, COUNT(*)::BIGINT AS count
        FROM plants, unnest(categories) AS category
        GROUP BY category
        ORDER BY count DESC, category ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CategoryCount::from).collect())
}

/// Aggregates over the plants in `category`; `None` when no plant carries it.
pub async fn stats_for(pool: &DbPool, category: &str) -> AppResult<Option<CategoryStats>> {
    let row = sqlx::query_as::<_, CategoryStatsRow>(
        r#"
        SELECT
            COUNT(*)::BIGINT AS total_plants,
            COUNT(*) FILTER (WHERE in_stock)::BIGINT AS in_stock,
            COUNT(*) FILTER (WHERE NOT in_stock)::BIGINT AS out_of_stock,
            AVG(price)::DOUBLE PRECISION AS avg_price,
            MIN(price) AS min_price,
            MAX(price) AS max_price,
            COALESCE(ARRAY_AGG(DISTINCT care_level ORDER BY care_level), '{}') AS care_levels,
            COALESCE(ARRAY_AGG(DISTINCT sunlight ORDER BY sunlight), '{}') AS sunlight_levels,
            COALESCE(ARRAY_AGG(DISTINCT watering ORDER BY watering), '{}') AS watering_levels
        FROM plants
        WHERE $1 = ANY(categories)
        "#,
    )
    .bind(category)
    .fetch_one(pool)
    .await?;

    tracing::debug!(category, total = row.total_plants, "category stats");
    Ok(stats_from_row(category, row))
}

fn stats_from_row(category: &str, row: CategoryStatsRow) -> Option<CategoryStats> {
    if row.total_plants == 0 {
        return None;
    }
    Some(CategoryStats {
        category: category.to_string(),
        total_plants: row.total_plants,
        in_stock: row.in_stock,
        out_of_stock: row.out_of_stock,
        avg_price: row.avg_price.unwrap_or_default(),
        min_price: row.min_price.unwrap_or_default(),
        max_price: row.max_price.unwrap_or_default(),
        care_levels: row.care_levels,
        sunlight_levels: row.sunlight_levels,
        watering_levels: row.watering_levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(total: i64, in_stock: i64) -> CategoryStatsRow {
        CategoryStatsRow {
            total_plants: total,
            in_stock,
            out_of_stock: total - in_stock,
            avg_price: (total > 0).then_some(300.0),
            min_price: (total > 0).then_some(100.0),
            max_price: (total > 0).then_some(500.0),
            care_levels: vec!["Easy".into()],
            sunlight_levels: vec!["Bright".into(), "Low".into()],
            watering_levels: vec!["Medium".into()],
        }
    }

    #[test]
    fn empty_category_has_no_stats() {
        assert!(stats_from_row("Cactus", row(0, 0)).is_none());
    }

    #[test]
    fn stats_carry_counts_and_price_bounds() {
        let stats = stats_from_row("Cactus", row(4, 3)).unwrap();
        assert_eq!(stats.category, "Cactus");
        assert_eq!(stats.total_plants, 4);
        assert_eq!(stats.in_stock + stats.out_of_stock, stats.total_plants);
        assert_eq!(stats.min_price, 100.0);
        assert_eq!(stats.max_price, 500.0);
        assert_eq!(stats.avg_price, 300.0);
        assert_eq!(stats.sunlight_levels, vec!["Bright", "Low"]);
    }
}
