//! `/authors` endpoints

use super::{client::ApiClient, endpoint::Endpoint};
use crate::{
    error::AppResult,
    models::{Author, CreateAuthor, ListQuery, ListResponse, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsApi {
    endpoint: Endpoint,
}

impl AuthorsApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            endpoint: Endpoint::new(client, "/authors", "authors", &["author", "authors"]),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse<Author>> {
        self.endpoint.list(query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Author> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Option<Author>> {
        self.endpoint.create(author).await
    }

    pub async fn update(&self, id: &str, author: &UpdateAuthor) -> AppResult<Option<Author>> {
        self.endpoint.update(id, author).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        self.endpoint.delete(id).await
    }
}
