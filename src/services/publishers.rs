//! Publisher management service

use validator::Validate;

use super::validation_message;
use crate::{
    api::publishers::PublishersApi,
    error::{AppError, AppResult},
    models::{ListQuery, ListResponse, Publisher, PublisherInput},
};

#[derive(Clone)]
pub struct PublishersService {
    api: PublishersApi,
}

impl PublishersService {
    pub fn new(api: PublishersApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: u32, limit: u32, name: Option<&str>, sort_by: Option<&str>) -> AppResult<ListResponse<Publisher>> {
        let query = ListQuery::page(page, limit)
            .search_by("name", name)
            .sort_by(sort_by);
        self.api.list(&query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Publisher> {
        self.api.get(id).await
    }

    pub async fn create(&self, name: &str) -> AppResult<Option<Publisher>> {
        let input = PublisherInput {
            name: name.trim().to_string(),
        };
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let created = self.api.create(&input).await?;
        tracing::info!("Publisher \"{}\" created", input.name);
        Ok(created)
    }

    pub async fn rename(&self, id: &str, name: &str) -> AppResult<Option<Publisher>> {
        let input = PublisherInput {
            name: name.trim().to_string(),
        };
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let updated = self.api.update(id, &input).await?;
        tracing::info!("Publisher {} renamed to \"{}\"", id, input.name);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        let message = self.api.delete(id).await?;
        tracing::info!("Publisher {} deleted", id);
        Ok(message)
    }
}
