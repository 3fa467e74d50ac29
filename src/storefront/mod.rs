//! Browser-side shop state: the fetched catalog, client-side filters, an
//! in-memory cart, favorites and the latest notification.

pub mod client;
pub mod filter;
pub mod form;
pub mod session;

pub use client::{CatalogClient, ClientError};
pub use filter::StorefrontFilters;
pub use session::{Cart, CartLine, Favorites, Notification, NotificationKind};

use uuid::Uuid;

use crate::{dto::plants::CreatePlantRequest, models::Plant};

pub struct Storefront {
    client: CatalogClient,
    plants: Vec<Plant>,
    categories: Vec<String>,
    pub filters: StorefrontFilters,
    cart: Cart,
    favorites: Favorites,
    notification: Option<Notification>,
}

impl Storefront {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            plants: Vec::new(),
            categories: Vec::new(),
            filters: StorefrontFilters::default(),
            cart: Cart::default(),
            favorites: Favorites::default(),
            notification: None,
        }
    }

    /// Fetches plants and categories concurrently. Whatever arrives is kept
    /// even when the other request fails.
    pub async fn load(&mut self) {
        let (plants, categories) =
            tokio::join!(self.client.get_all_plants(), self.client.categories());

        let mut failed = false;
        match plants {
            Ok(resp) => self.plants = resp.data.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load plants");
                failed = true;
            }
        }
        match categories {
            Ok(resp) => {
                self.categories = resp
                    .data
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| c.name)
                    .collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                failed = true;
            }
        }

        if failed {
            self.notify(Notification::info(
                "Failed to load plants. Please check your connection.",
            ));
        }
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn visible_plants(&self) -> Vec<&Plant> {
        self.filters.apply(&self.plants)
    }

    /// Creates the plant remotely and puts the stored record at the front of the list.
    /// An incomplete form is rejected before any request is made.
    pub async fn add_plant(&mut self, request: &CreatePlantRequest) -> Result<Plant, ClientError> {
        let problems = form::check_new_plant(request);
        if !problems.is_empty() {
            return Err(ClientError::Invalid(problems));
        }

        let created = self.client.create_plant(request).await.and_then(|resp| {
            resp.data.ok_or_else(|| ClientError::Api {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "response carried no plant".into(),
                details: Vec::new(),
            })
        });

        match created {
            Ok(plant) => {
                self.plants.insert(0, plant.clone());
                self.notify(Notification::success(format!(
                    "{} added successfully!",
                    plant.name
                )));
                Ok(plant)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to add plant");
                self.notify(Notification::info("Failed to add plant. Please try again."));
                Err(err)
            }
        }
    }

    /// Returns `false` when the id is not in the loaded catalog.
    pub fn add_to_cart(&mut self, plant_id: Uuid, quantity: u32) -> bool {
        let Some(plant) = self.plants.iter().find(|p| p.id == plant_id).cloned() else {
            return false;
        };
        let note = self.cart.add(plant, quantity);
        self.notify(note);
        true
    }

    pub fn toggle_favorite(&mut self, plant_id: Uuid) -> bool {
        let Some(plant) = self.plants.iter().find(|p| p.id == plant_id) else {
            return false;
        };
        let note = self.favorites.toggle(plant);
        self.notify(note);
        true
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}
