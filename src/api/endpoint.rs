//! Generic CRUD binding for one REST collection

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{
    client::ApiClient,
    normalizer::{normalize_list, normalize_record},
};
use crate::{
    error::{AppError, AppResult},
    models::{ListQuery, ListResponse},
};

/// A collection such as `/books`, with the keys its envelope uses
#[derive(Clone)]
pub struct Endpoint {
    client: ApiClient,
    path: &'static str,
    list_key: &'static str,
    record_keys: &'static [&'static str],
}

impl Endpoint {
    pub fn new(
        client: ApiClient,
        path: &'static str,
        list_key: &'static str,
        record_keys: &'static [&'static str],
    ) -> Self {
        Self {
            client,
            path,
            list_key,
            record_keys,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn item_path(&self, id: &str) -> AppResult<String> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::Validation("Identifier is required".to_string()));
        }
        Ok(format!("{}/{}", self.path, id))
    }

    /// Record echoed by a successful write. The write already happened, so an
    /// unreadable echo is dropped rather than reported.
    fn echoed<T>(&self, response: &Value) -> Option<T>
    where
        T: DeserializeOwned,
    {
        normalize_record(response, self.record_keys).ok().flatten()
    }

    /// `GET <path>?query` without any normalization
    pub async fn list_raw(&self, query: &ListQuery) -> AppResult<Value> {
        self.client.get_with_query(self.path, query).await
    }

    /// `GET <path>?query`, normalized
    pub async fn list<T>(&self, query: &ListQuery) -> AppResult<ListResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.list_raw(query).await?;
        normalize_list(&response, self.list_key)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// `GET <path>/{id}`
    pub async fn get<T>(&self, id: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(&self.item_path(id)?).await?;
        normalize_record(&response, self.record_keys)?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", self.path, id)))
    }

    /// `POST <path>`; returns the created record when the backend echoes it
    pub async fn create<B, T>(&self, body: &B) -> AppResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.path, body).await?;
        Ok(self.echoed(&response))
    }

    /// `PUT <path>/{id}`; returns the updated record when the backend echoes it
    pub async fn update<B, T>(&self, id: &str, body: &B) -> AppResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.put(&self.item_path(id)?, body).await?;
        Ok(self.echoed(&response))
    }

    /// `DELETE <path>/{id}`; returns the backend message, if any
    pub async fn delete(&self, id: &str) -> AppResult<Option<String>> {
        let response = self.client.delete(&self.item_path(id)?).await?;
        Ok(response
            .pointer("/data/message")
            .or_else(|| response.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}
