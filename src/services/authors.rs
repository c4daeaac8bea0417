//! Author management service

use validator::Validate;

use super::validation_message;
use crate::{
    api::authors::AuthorsApi,
    error::{AppError, AppResult},
    models::{Author, CreateAuthor, ListQuery, ListResponse, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsService {
    api: AuthorsApi,
}

impl AuthorsService {
    pub fn new(api: AuthorsApi) -> Self {
        Self { api }
    }

    /// List authors, optionally filtered by name
    pub async fn list(&self, page: u32, limit: u32, name: Option<&str>, sort_by: Option<&str>) -> AppResult<ListResponse<Author>> {
        let query = ListQuery::page(page, limit)
            .search_by("name", name)
            .sort_by(sort_by);
        self.api.list(&query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Author> {
        self.api.get(id).await
    }

    pub async fn create(&self, mut author: CreateAuthor) -> AppResult<Option<Author>> {
        author.name = author.name.trim().to_string();
        author
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let created = self.api.create(&author).await?;
        tracing::info!("Author \"{}\" created", author.name);
        Ok(created)
    }

    pub async fn update(&self, id: &str, author: UpdateAuthor) -> AppResult<Option<Author>> {
        author
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let updated = self.api.update(id, &author).await?;
        tracing::info!("Author {} updated", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        let message = self.api.delete(id).await?;
        tracing::info!("Author {} deleted", id);
        Ok(message)
    }
}
