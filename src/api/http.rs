use crate::api::traits::PropertyApi;
use crate::api::types::{ApiError, ApiResult, PROPERTIES_PATH};
use crate::models::{Property, PropertyId, PropertyInput};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the listing backend
pub struct HttpPropertyApi {
    client: Client,
    collection_url: String,
}

impl HttpPropertyApi {
    /// Create a client for the backend at `base_url` with the default timeout
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let parsed =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("listing-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let collection_url = format!("{}{}", base_url.trim_end_matches('/'), PROPERTIES_PATH);
        info!("Listing backend at {}", collection_url);

        Ok(Self {
            client,
            collection_url,
        })
    }

    fn item_url(&self, id: PropertyId) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    /// Send a request and fail on transport errors or non-2xx statuses
    async fn send(&self, method: &'static str, url: &str, request: RequestBuilder) -> ApiResult<Response> {
        debug!("{} {}", method, url);

        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
            ApiError::Transport(e)
        })?;

        if !response.status().is_success() {
            warn!("{} {} returned status: {}", method, url, response.status());
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ApiResult<T> {
        let body = response.text().await?;
        debug!("Read {} bytes from {}", body.len(), url);

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn list(&self) -> ApiResult<Vec<Property>> {
        let url = &self.collection_url;
        let response = self.send("GET", url, self.client.get(url)).await?;
        Self::decode(url, response).await
    }

    async fn get(&self, id: PropertyId) -> ApiResult<Property> {
        let url = self.item_url(id);
        let response = self.send("GET", &url, self.client.get(&url)).await?;
        Self::decode(&url, response).await
    }

    async fn create(&self, input: &PropertyInput) -> ApiResult<Property> {
        let url = &self.collection_url;
        let response = self
            .send("POST", url, self.client.post(url).json(input))
            .await?;
        Self::decode(url, response).await
    }

    async fn update(&self, id: PropertyId, input: &PropertyInput) -> ApiResult<Property> {
        let url = self.item_url(id);
        let response = self
            .send("PUT", &url, self.client.put(&url).json(input))
            .await?;
        Self::decode(&url, response).await
    }

    async fn delete(&self, id: PropertyId) -> ApiResult<()> {
        let url = self.item_url(id);
        self.send("DELETE", &url, self.client.delete(&url)).await?;
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.collection_url
    }
}
