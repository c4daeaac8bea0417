//! Category management service

use validator::Validate;

use super::validation_message;
use crate::{
    api::categories::CategoriesApi,
    error::{AppError, AppResult},
    models::{BulkCategories, Category, CategoryInput, ListQuery, ListResponse},
};

#[derive(Clone)]
pub struct CategoriesService {
    api: CategoriesApi,
}

impl CategoriesService {
    pub fn new(api: CategoriesApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: u32, limit: u32, name: Option<&str>, sort_by: Option<&str>) -> AppResult<ListResponse<Category>> {
        let query = ListQuery::page(page, limit)
            .search_by("name", name)
            .sort_by(sort_by);
        self.api.list(&query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Category> {
        self.api.get(id).await
    }

    pub async fn create(&self, name: &str) -> AppResult<Option<Category>> {
        let input = CategoryInput {
            name: name.trim().to_string(),
        };
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let created = self.api.create(&input).await?;
        tracing::info!("Category \"{}\" created", input.name);
        Ok(created)
    }

    /// Create several categories in one request; blank names are dropped
    pub async fn create_bulk<S: AsRef<str>>(&self, names: &[S]) -> AppResult<Vec<Category>> {
        let bulk = BulkCategories::from_names(names);
        if bulk.categories.is_empty() {
            return Err(AppError::Validation(
                "At least one category name is required".to_string(),
            ));
        }
        let created = self.api.create_bulk(&bulk).await?;
        tracing::info!("{} categories submitted in bulk", bulk.categories.len());
        Ok(created)
    }

    pub async fn rename(&self, id: &str, name: &str) -> AppResult<Option<Category>> {
        let input = CategoryInput {
            name: name.trim().to_string(),
        };
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let updated = self.api.update(id, &input).await?;
        tracing::info!("Category {} renamed to \"{}\"", id, input.name);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        let message = self.api.delete(id).await?;
        tracing::info!("Category {} deleted", id);
        Ok(message)
    }
}
