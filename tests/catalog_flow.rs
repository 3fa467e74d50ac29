use plant_catalog_api::{
    db::{create_pool, run_migrations},
    dto::plants::{CreatePlantRequest, UpdatePlantRequest},
    error::AppError,
    models::Plant,
    routes::params::{PlantQuery, PopularQuery},
    services::{category_service, plant_service},
    state::AppState,
};
use serde_json::json;

// Integration flow against a real database: create, query, toggle, aggregate, delete.
#[tokio::test]
async fn catalog_crud_query_and_stats_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run catalog flow tests."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    sqlx::query("TRUNCATE plants").execute(&pool).await?;
    let state = AppState::new(pool);

    // Duplicate categories collapse on create
    let fern = create(&state, "Boston Fern", 350.0, &["Indoor", "Indoor", "Hanging"], true).await?;
    assert_eq!(fern.categories, vec!["Indoor", "Hanging"]);
    assert!(fern.in_stock);

    let mut plants = vec![fern.clone()];
    for i in 0..14 {
        let price = 100.0 + f64::from(i) * 50.0;
        let in_stock = i % 3 != 0;
        plants.push(create(&state, &format!("Succulent {i:02}"), price, &["Succulent"], in_stock).await?);
    }

    // Inclusive price range
    let resp = plant_service::list_plants(
        &state,
        PlantQuery {
            min_price: Some("200".into()),
            max_price: Some("350".into()),
            ..Default::default()
        },
    )
    .await?;
    let prices: Vec<f64> = resp.data.unwrap_or_default().iter().map(|p| p.price).collect();
    assert!(prices.contains(&200.0) && prices.contains(&350.0));
    assert!(prices.iter().all(|p| (200.0..=350.0).contains(p)));

    // Second page of ten is items 11..=15 of the full ordering
    let by_price_desc = |page: Option<&str>, limit: Option<&str>| PlantQuery {
        page: page.map(Into::into),
        limit: limit.map(Into::into),
        sort_by: Some("price".into()),
        sort_order: Some("desc".into()),
        ..Default::default()
    };
    let all_ids: Vec<_> = plant_service::list_plants(&state, by_price_desc(None, None))
        .await?
        .data
        .unwrap_or_default()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(all_ids.len(), 15);

    let resp = plant_service::list_plants(&state, by_price_desc(Some("2"), Some("10"))).await?;
    let pagination = resp.pagination.expect("pagination");
    let page_ids: Vec<_> = resp.data.unwrap_or_default().iter().map(|p| p.id).collect();
    assert_eq!(page_ids, all_ids[10..15]);
    assert_eq!(pagination.current_page, 2);
    assert_eq!(pagination.total_pages, 2);
    assert_eq!(pagination.total_items, 15);
    assert!(!pagination.has_next_page);
    assert!(pagination.has_prev_page);

    // Pages far past the end are empty rather than an error
    for (page, limit) in [(Some("1e18"), Some("10")), (None, Some("1e19"))] {
        let resp = plant_service::list_plants(&state, by_price_desc(page, limit)).await?;
        let pagination = resp.pagination.expect("pagination");
        assert_eq!(pagination.total_items, 15);
        if page.is_some() {
            assert!(resp.data.unwrap_or_default().is_empty());
        }
    }

    // Search treats LIKE metacharacters literally
    let resp = plant_service::search_plants(&state, "100%").await?;
    assert_eq!(resp.count, Some(0));
    let resp = plant_service::search_plants(&state, "succulent 0").await?;
    assert_eq!(resp.count, Some(10));

    // Category and search lookups
    let resp = plant_service::plants_by_category(&state, "Hanging").await?;
    assert_eq!(resp.count, Some(1));
    let resp = plant_service::search_plants(&state, "FERN").await?;
    assert_eq!(resp.search_term.as_deref(), Some("FERN"));
    assert_eq!(resp.data.unwrap_or_default()[0].id, fern.id);

    // Toggling twice restores the flag
    let id = fern.id.to_string();
    let once = plant_service::toggle_stock(&state, &id).await?;
    assert_eq!(once.message.as_deref(), Some("Stock status updated to Out of Stock"));
    let twice = plant_service::toggle_stock(&state, &id).await?;
    assert_eq!(twice.data.map(|p| p.in_stock), Some(true));

    // Partial update keeps untouched fields and dedupes categories
    let updated = plant_service::update_plant(
        &state,
        &id,
        UpdatePlantRequest {
            price: Some(json!(399.0)),
            categories: Some(json!(["Indoor", "Pet Safe", "Pet Safe"])),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("updated plant");
    assert_eq!(updated.name, "Boston Fern");
    assert_eq!(updated.price, 399.0);
    assert_eq!(updated.categories, vec!["Indoor", "Pet Safe"]);
    assert!(updated.updated_at >= fern.updated_at);

    // Aggregates
    let resp = category_service::category_stats(&state, "Succulent").await?;
    let stats = resp.data.expect("stats");
    assert_eq!(stats.total_plants, 14);
    assert_eq!(stats.in_stock + stats.out_of_stock, 14);
    assert_eq!(stats.min_price, 100.0);
    assert_eq!(stats.max_price, 750.0);

    let missing = category_service::category_stats(&state, "Rare").await;
    assert!(matches!(missing, Err(AppError::NotFound("Category not found"))));

    let popular = category_service::popular_categories(
        &state,
        PopularQuery {
            limit: Some("1".into()),
        },
    )
    .await?
    .data
    .unwrap_or_default();
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].name, "Succulent");
    assert_eq!(popular[0].count, 14);

    let resp = category_service::list_categories(&state).await?;
    assert_eq!(resp.total_categories, Some(3));

    // Missing plants
    let unknown = uuid::Uuid::new_v4().to_string();
    let update = plant_service::update_plant(&state, &unknown, UpdatePlantRequest::default()).await;
    assert!(matches!(update, Err(AppError::NotFound("Plant not found"))));
    let delete = plant_service::delete_plant(&state, &unknown).await;
    assert!(matches!(delete, Err(AppError::NotFound("Plant not found"))));

    // Delete returns the removed record
    let deleted = plant_service::delete_plant(&state, &id).await?;
    assert_eq!(deleted.data.map(|p| p.id), Some(fern.id));
    assert!(matches!(
        plant_service::get_plant(&state, &id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

async fn create(
    state: &AppState,
    name: &str,
    price: f64,
    categories: &[&str],
    in_stock: bool,
) -> anyhow::Result<Plant> {
    let request = CreatePlantRequest {
        name: Some(name.to_string()),
        price: Some(json!(price)),
        categories: Some(json!(categories)),
        in_stock: Some(in_stock),
        image: Some(format!("https://images.example.com/{}.jpg", name.replace(' ', "-"))),
        ..Default::default()
    };
    let resp = plant_service::create_plant(state, request).await?;
    Ok(resp.data.expect("created plant"))
}
