//! REST bindings for the library backend

pub mod auth;
pub mod authors;
pub mod books;
pub mod categories;
pub mod client;
pub mod endpoint;
pub mod normalizer;
pub mod publishers;
pub mod users;

use async_trait::async_trait;
use serde_json::Value;

pub use client::ApiClient;

use crate::{
    error::AppResult,
    models::ListQuery,
    services::reference_data::{ReferenceKind, ReferenceSource},
};

/// Container for all endpoint bindings
#[derive(Clone)]
pub struct Api {
    pub auth: auth::AuthApi,
    pub authors: authors::AuthorsApi,
    pub books: books::BooksApi,
    pub categories: categories::CategoriesApi,
    pub publishers: publishers::PublishersApi,
    pub users: users::UsersApi,
}

impl Api {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: auth::AuthApi::new(client.clone()),
            authors: authors::AuthorsApi::new(client.clone()),
            books: books::BooksApi::new(client.clone()),
            categories: categories::CategoriesApi::new(client.clone()),
            publishers: publishers::PublishersApi::new(client.clone()),
            users: users::UsersApi::new(client),
        }
    }
}

#[async_trait]
impl ReferenceSource for Api {
    async fn fetch_reference(&self, kind: ReferenceKind, query: &ListQuery) -> AppResult<Value> {
        let endpoint = match kind {
            ReferenceKind::Authors => self.authors.endpoint(),
            ReferenceKind::Categories => self.categories.endpoint(),
            ReferenceKind::Publishers => self.publishers.endpoint(),
        };
        endpoint.list_raw(query).await
    }
}
