//! `/users` endpoints

use super::{client::ApiClient, endpoint::Endpoint};
use crate::{
    error::AppResult,
    models::{CreateUser, ListQuery, ListResponse, UpdateUser, User},
};

#[derive(Clone)]
pub struct UsersApi {
    endpoint: Endpoint,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            endpoint: Endpoint::new(client, "/users", "users", &["user", "users"]),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse<User>> {
        self.endpoint.list(query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<User> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, user: &CreateUser) -> AppResult<Option<User>> {
        self.endpoint.create(user).await
    }

    pub async fn update(&self, id: &str, user: &UpdateUser) -> AppResult<Option<User>> {
        self.endpoint.update(id, user).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        self.endpoint.delete(id).await
    }
}
