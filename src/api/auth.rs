//! `/auth` endpoints

use super::client::ApiClient;
use crate::{
    error::{AppError, AppResult},
    models::{LoginRequest, LoginResponse},
};

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. Accepts the response at the top level or under `.data`.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let response = self.client.post_public("/auth/login", request).await?;
        let body = match response.get("data") {
            Some(data) if data.get("accessToken").is_some() => data.clone(),
            _ => response,
        };
        serde_json::from_value(body)
            .map_err(|e| AppError::Authentication(format!("Unexpected login response: {}", e)))
    }
}
