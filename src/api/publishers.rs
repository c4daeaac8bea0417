//! `/publishers` endpoints

use super::{client::ApiClient, endpoint::Endpoint};
use crate::{
    error::AppResult,
    models::{ListQuery, ListResponse, Publisher, PublisherInput},
};

#[derive(Clone)]
pub struct PublishersApi {
    endpoint: Endpoint,
}

impl PublishersApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            endpoint: Endpoint::new(client, "/publishers", "publishers", &["publisher", "publishers"]),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse<Publisher>> {
        self.endpoint.list(query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Publisher> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, publisher: &PublisherInput) -> AppResult<Option<Publisher>> {
        self.endpoint.create(publisher).await
    }

    pub async fn update(&self, id: &str, publisher: &PublisherInput) -> AppResult<Option<Publisher>> {
        self.endpoint.update(id, publisher).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        self.endpoint.delete(id).await
    }
}
