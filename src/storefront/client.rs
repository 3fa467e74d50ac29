use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    dto::plants::{CreatePlantRequest, UpdatePlantRequest},
    models::{CategoryCount, CategoryStats, Plant},
    response::{ApiResponse, FieldError},
    routes::params::PlantQuery,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    Url(String),

    #[error("plant form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        details: Vec<FieldError>,
    },
}

/// Thin HTTP client over the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    http: Client,
}

impl CatalogClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:4000/api";

    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http: Client::new(),
        })
    }

    pub async fn get_plants(&self, query: &PlantQuery) -> Result<ApiResponse<Vec<Plant>>, ClientError> {
        let url = self.endpoint(&["plants"])?;
        self.send(self.http.get(url).query(query)).await
    }

    pub async fn get_all_plants(&self) -> Result<ApiResponse<Vec<Plant>>, ClientError> {
        let url = self.endpoint(&["plants"])?;
        self.send(self.http.get(url)).await
    }

    pub async fn get_plant(&self, id: &str) -> Result<ApiResponse<Plant>, ClientError> {
        let url = self.endpoint(&["plants", id])?;
        self.send(self.http.get(url)).await
    }

    pub async fn create_plant(
        &self,
        plant: &CreatePlantRequest,
    ) -> Result<ApiResponse<Plant>, ClientError> {
        let url = self.endpoint(&["plants"])?;
        self.send(self.http.post(url).json(plant)).await
    }

    pub async fn update_plant(
        &self,
        id: &str,
        changes: &UpdatePlantRequest,
    ) -> Result<ApiResponse<Plant>, ClientError> {
        let url = self.endpoint(&["plants", id])?;
        self.send(self.http.put(url).json(changes)).await
    }

    pub async fn delete_plant(&self, id: &str) -> Result<ApiResponse<Plant>, ClientError> {
        let url = self.endpoint(&["plants", id])?;
        self.send(self.http.delete(url)).await
    }

    pub async fn toggle_stock(&self, id: &str) -> Result<ApiResponse<Plant>, ClientError> {
        let url = self.endpoint(&["plants", id, "toggle-stock"])?;
        self.send(self.http.patch(url)).await
    }

    pub async fn plants_by_category(
        &self,
        category: &str,
    ) -> Result<ApiResponse<Vec<Plant>>, ClientError> {
        let url = self.endpoint(&["plants", "categories", category])?;
        self.send(self.http.get(url)).await
    }

    pub async fn search_plants(&self, term: &str) -> Result<ApiResponse<Vec<Plant>>, ClientError> {
        let url = self.endpoint(&["plants", "search", term])?;
        self.send(self.http.get(url)).await
    }

    pub async fn categories(&self) -> Result<ApiResponse<Vec<CategoryCount>>, ClientError> {
        let url = self.endpoint(&["categories"])?;
        self.send(self.http.get(url)).await
    }

    pub async fn popular_categories(
        &self,
        limit: u64,
    ) -> Result<ApiResponse<Vec<CategoryCount>>, ClientError> {
        let url = self.endpoint(&["categories", "popular"])?;
        self.send(self.http.get(url).query(&[("limit", limit)])).await
    }

    pub async fn category_stats(
        &self,
        category: &str,
    ) -> Result<ApiResponse<CategoryStats>, ClientError> {
        let url = self.endpoint(&["categories", category, "stats"])?;
        self.send(self.http.get(url)).await
    }

    pub async fn health(&self) -> Result<ApiResponse<serde_json::Value>, ClientError> {
        let url = self.endpoint(&["health"])?;
        self.send(self.http.get(url)).await
    }

    pub async fn is_api_available(&self) -> bool {
        self.health().await.is_ok()
    }

    /// Append percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::Url(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let fallback = format!("HTTP error! status: {}", status.as_u16());
            let (message, details) = match response.json::<ApiResponse<serde_json::Value>>().await {
                Ok(body) => (body.message.or(body.error).unwrap_or(fallback), body.details),
                Err(_) => (fallback, Vec::new()),
            };
            tracing::warn!(%status, %message, "catalog request failed");
            return Err(ClientError::Api {
                status,
                message,
                details,
            });
        }

        Ok(response.json::<ApiResponse<T>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_segments() {
        let client = CatalogClient::new("http://localhost:4000/api").unwrap();
        let url = client
            .endpoint(&["plants", "categories", "Air Purifying"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/api/plants/categories/Air%20Purifying"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        let client = CatalogClient::new("http://localhost:4000/api/").unwrap();
        let url = client.endpoint(&["categories", "popular"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/categories/popular");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(CatalogClient::new("not a url"), Err(ClientError::Url(_))));
        assert!(matches!(CatalogClient::new("mailto:plants@example.com"), Err(ClientError::Url(_))));
    }
}
