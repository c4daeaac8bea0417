//! Reader account management service

use validator::Validate;

use super::validation_message;
use crate::{
    api::users::UsersApi,
    error::{AppError, AppResult},
    models::{CreateUser, ListQuery, ListResponse, UpdateUser, User},
};

#[derive(Clone)]
pub struct UsersService {
    api: UsersApi,
}

impl UsersService {
    pub fn new(api: UsersApi) -> Self {
        Self { api }
    }

    /// List users, optionally filtered by keyword
    pub async fn list(&self, page: u32, limit: u32, keyword: Option<&str>) -> AppResult<ListResponse<User>> {
        let query = ListQuery::page(page, limit).keyword(keyword);
        self.api.list(&query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<User> {
        self.api.get(id).await
    }

    pub async fn create(&self, mut user: CreateUser) -> AppResult<Option<User>> {
        user.name = user.name.trim().to_string();
        user.email = user.email.trim().to_string();
        user.validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let created = self.api.create(&user).await?;
        tracing::info!("User {} created", user.email);
        Ok(created)
    }

    pub async fn update(&self, id: &str, user: UpdateUser) -> AppResult<Option<User>> {
        user.validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;
        let updated = self.api.update(id, &user).await?;
        tracing::info!("User {} updated", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        let message = self.api.delete(id).await?;
        tracing::info!("User {} deleted", id);
        Ok(message)
    }
}
