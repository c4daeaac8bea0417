//! HTTP transport shared by every endpoint binding

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    session::Session,
};

/// JSON client bound to the configured API base and the injected session
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Absolute URL of an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> AppResult<Value> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub async fn get_with_query<Q>(&self, path: &str, query: &Q) -> AppResult<Value>
    where
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> AppResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    /// POST without a bearer token (login)
    pub async fn post_public<B>(&self, path: &str, body: &B) -> AppResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.http.request(Method::POST, self.url(path)).json(body);
        tracing::debug!("POST {} (public)", path);
        self.send(builder).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> AppResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<Value> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    /// Authenticated request builder; fails when no session is open
    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let token = self.session.require_token()?;
        tracing::debug!("{} {}", method, path);
        Ok(self.http.request(method, self.url(path)).bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = AppError::from_status(status, &body);
            tracing::warn!("Request failed with {}: {}", status, error);
            return Err(error);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySession;
    use std::sync::Arc;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, Arc::new(InMemorySession::new())).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let api = client("http://localhost:8080/api/");
        assert_eq!(api.url("/books"), "http://localhost:8080/api/books");
        assert_eq!(api.url("books/42"), "http://localhost:8080/api/books/42");
    }

    #[tokio::test]
    async fn test_authenticated_request_requires_session() {
        let api = client("http://localhost:1");
        let result = api.get("/books").await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }
}
