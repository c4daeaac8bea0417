//! `/categories` endpoints

use serde_json::Value;

use super::{client::ApiClient, endpoint::Endpoint, normalizer::extract_list};
use crate::{
    error::AppResult,
    models::{BulkCategories, Category, CategoryInput, ListQuery, ListResponse},
};

#[derive(Clone)]
pub struct CategoriesApi {
    endpoint: Endpoint,
}

impl CategoriesApi {
    pub fn new(client: ApiClient) -> Self {
        // Single-record replies put the record under `categories` as well.
        Self {
            endpoint: Endpoint::new(client, "/categories", "categories", &["category", "categories"]),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse<Category>> {
        self.endpoint.list(query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Category> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, category: &CategoryInput) -> AppResult<Option<Category>> {
        self.endpoint.create(category).await
    }

    /// `POST /categories/bulk`; returns the created records when echoed
    pub async fn create_bulk(&self, bulk: &BulkCategories) -> AppResult<Vec<Category>> {
        let response = self.endpoint.client().post("/categories/bulk", bulk).await?;
        Ok(extract_list(&response, "categories")
            .map(|list| {
                list.iter()
                    .cloned()
                    .filter_map(|raw: Value| serde_json::from_value(raw).ok())
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn update(&self, id: &str, category: &CategoryInput) -> AppResult<Option<Category>> {
        self.endpoint.update(id, category).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        self.endpoint.delete(id).await
    }
}
