use super::{ApiRequest, ContentSource};
use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// [`ContentSource`] over HTTP. Every request carries the same timeout; a
/// timeout surfaces as [`FetchError::Network`] like any transport failure.
pub struct HttpContentSource {
    client: Client,
    base_url: Url,
}

impl HttpContentSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .context("failed to build HTTP client")?;
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid base URL: {}", base_url))?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn get(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        let url = request.to_url(&self.base_url)?;
        tracing::trace!(%url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(request, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::network(
                request,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::network(request, e))?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::decode(request, e))
    }
}
