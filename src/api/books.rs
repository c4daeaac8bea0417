//! `/books` endpoints

use async_trait::async_trait;

use super::{client::ApiClient, endpoint::Endpoint};
use crate::{
    error::AppResult,
    models::{Book, BookPayload, ListQuery, ListResponse},
    services::book_form::BookGateway,
};

#[derive(Clone)]
pub struct BooksApi {
    endpoint: Endpoint,
}

impl BooksApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            endpoint: Endpoint::new(client, "/books", "books", &["book", "books"]),
        }
    }

    /// `GET /books?page&limit&search`
    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse<Book>> {
        self.endpoint.list(query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, payload: &BookPayload) -> AppResult<Option<Book>> {
        self.endpoint.create(payload).await
    }

    pub async fn update(&self, id: &str, payload: &BookPayload) -> AppResult<Option<Book>> {
        self.endpoint.update(id, payload).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        self.endpoint.delete(id).await
    }
}

#[async_trait]
impl BookGateway for BooksApi {
    async fn fetch_book(&self, id: &str) -> AppResult<Book> {
        self.get(id).await
    }

    async fn create_book(&self, payload: &BookPayload) -> AppResult<Option<Book>> {
        self.create(payload).await
    }

    async fn update_book(&self, id: &str, payload: &BookPayload) -> AppResult<Option<Book>> {
        self.update(id, payload).await
    }
}
