use plant_catalog_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::plants::CreatePlantRequest,
    services::plant_service,
    state::AppState,
};

struct SeedPlant {
    name: &'static str,
    scientific_name: &'static str,
    price: f64,
    categories: &'static [&'static str],
    care_level: &'static str,
    sunlight: &'static str,
    watering: &'static str,
    in_stock: bool,
    image: &'static str,
    description: &'static str,
}

const PLANTS: &[SeedPlant] = &[
    SeedPlant {
        name: "Money Plant",
        scientific_name: "Epipremnum aureum",
        price: 299.0,
        categories: &["Indoor", "Air Purifying", "Low Maintenance", "Hanging", "Trailing"],
        care_level: "Easy",
        sunlight: "Low",
        watering: "Medium",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1614594975525-e45190c55d0b",
        description: "A hardy trailing vine that tolerates low light and irregular watering.",
    },
    SeedPlant {
        name: "Snake Plant",
        scientific_name: "Dracaena trifasciata",
        price: 449.0,
        categories: &["Indoor", "Air Purifying", "Low Maintenance", "Low Light"],
        care_level: "Easy",
        sunlight: "Low",
        watering: "Low",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1593482892290-f54927ae2b7b",
        description: "Upright sword-shaped leaves; one of the easiest plants to keep alive.",
    },
    SeedPlant {
        name: "Fiddle Leaf Fig",
        scientific_name: "Ficus lyrata",
        price: 1899.0,
        categories: &["Indoor", "Large", "Statement Plant", "Premium"],
        care_level: "Hard",
        sunlight: "Bright",
        watering: "Medium",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1545241047-6083a3684587",
        description: "Large violin-shaped leaves that reward a bright, stable spot.",
    },
    SeedPlant {
        name: "Aloe Vera",
        scientific_name: "Aloe barbadensis miller",
        price: 249.0,
        categories: &["Succulent", "Medicinal", "Small", "Desktop"],
        care_level: "Easy",
        sunlight: "Bright",
        watering: "Low",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1596547609652-9cf5d8d76921",
        description: "Soothing gel-filled leaves; needs little water and plenty of sun.",
    },
    SeedPlant {
        name: "Tulsi",
        scientific_name: "Ocimum tenuiflorum",
        price: 149.0,
        categories: &["Herb", "Medicinal", "Outdoor", "Fragrant"],
        care_level: "Easy",
        sunlight: "Bright",
        watering: "High",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1600326145552-327c4df2c246",
        description: "Holy basil, grown for its aromatic leaves.",
    },
    SeedPlant {
        name: "Calathea Orbifolia",
        scientific_name: "Goeppertia orbifolia",
        price: 899.0,
        categories: &["Indoor", "Prayer Plant", "Pet Safe", "Tropical", "Shade Loving"],
        care_level: "Hard",
        sunlight: "Medium",
        watering: "High",
        in_stock: false,
        image: "https://images.unsplash.com/photo-1602923668104-8f9e03e77e62",
        description: "Broad striped leaves that fold up at night.",
    },
    SeedPlant {
        name: "Golden Barrel Cactus",
        scientific_name: "Echinocactus grusonii",
        price: 399.0,
        categories: &["Cactus", "Desert", "Outdoor", "Low Maintenance"],
        care_level: "Easy",
        sunlight: "Bright",
        watering: "Low",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1509423350716-97f9360b4e09",
        description: "A slow-growing globe of golden spines.",
    },
    SeedPlant {
        name: "Jasmine",
        scientific_name: "Jasminum sambac",
        price: 349.0,
        categories: &["Outdoor", "Flowering", "Fragrant", "Climbing"],
        care_level: "Medium",
        sunlight: "Bright",
        watering: "Medium",
        in_stock: true,
        image: "https://images.unsplash.com/photo-1597848212624-a19eb35e2651",
        description: "Climbing vine with intensely fragrant white flowers.",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let existing: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plants")
        .fetch_one(&pool)
        .await?;
    if existing.0 > 0 {
        println!("Catalog already has {} plants, skipping seed", existing.0);
        return Ok(());
    }

    let state = AppState::new(pool);
    for plant in PLANTS {
        let request = CreatePlantRequest {
            name: Some(plant.name.to_string()),
            price: Some(plant.price.into()),
            categories: Some(plant.categories.to_vec().into()),
            in_stock: Some(plant.in_stock),
            image: Some(plant.image.to_string()),
            description: Some(plant.description.to_string()),
            scientific_name: Some(plant.scientific_name.to_string()),
            care_level: Some(plant.care_level.to_string()),
            sunlight: Some(plant.sunlight.to_string()),
            watering: Some(plant.watering.to_string()),
        };
        plant_service::create_plant(&state, request)
            .await
            .map_err(|e| anyhow::anyhow!("seeding {}: {e}", plant.name))?;
    }

    println!("Seeded {} plants", PLANTS.len());
    Ok(())
}
