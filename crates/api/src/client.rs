//! Seller API HTTP Client Implementation
//!
//! Every request carries the session token as a bearer credential. Collection
//! endpoints live at `{base_url}/{resource}` and items at
//! `{base_url}/{resource}/{id}`.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ApiConfig, ApiError, Resource};

/// HTTP client for the seller API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client scoped to one seller resource
    pub fn resource(&self, resource: Resource) -> ResourceClient<'_> {
        ResourceClient {
            client: self,
            resource,
        }
    }
}

/// Collection responses come either bare or wrapped in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

/// CRUD operations on one seller resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceClient<'a> {
    client: &'a ApiClient,
    resource: Resource,
}

impl ResourceClient<'_> {
    fn collection_url(&self) -> String {
        format!("{}/{}", self.client.base_url, self.resource.path())
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    pub async fn list<T: DeserializeOwned>(&self, token: &str) -> Result<Vec<T>, ApiError> {
        let request = self.client.http.get(self.collection_url());
        let body: ListBody<T> = self.send_json(request, token).await?;
        let items = body.into_items();

        tracing::debug!(resource = %self.resource, count = items.len(), "Listed resource");
        Ok(items)
    }

    pub async fn create<B, T>(&self, token: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.http.post(self.collection_url()).json(body);
        let created = self.send_json(request, token).await?;

        tracing::info!(resource = %self.resource, "Created resource item");
        Ok(created)
    }

    pub async fn update<B, T>(&self, token: &str, id: u64, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.http.put(self.item_url(id)).json(body);
        let updated = self.send_json(request, token).await?;

        tracing::info!(resource = %self.resource, id, "Updated resource item");
        Ok(updated)
    }

    pub async fn delete(&self, token: &str, id: u64) -> Result<(), ApiError> {
        let request = self.client.http.delete(self.item_url(id));
        self.send(request, token).await?;

        tracing::info!(resource = %self.resource, id, "Deleted resource item");
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<T, ApiError> {
        self.send(request, token)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Response(e.to_string()))
    }

    async fn send(&self, request: RequestBuilder, token: &str) -> Result<Response, ApiError> {
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            tracing::warn!(resource = %self.resource, status, error = %err, "API request failed");
            return Err(err);
        }

        Ok(response)
    }
}
