pub mod http;
pub mod request;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::FetchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use request::ApiRequest;

/// A remote service answering GET requests with JSON.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get(&self, request: &ApiRequest) -> Result<Value, FetchError>;
}

/// Issue `request` and decode the answer into `T`.
pub async fn get_json<T: DeserializeOwned>(
    api: &dyn ContentSource,
    request: &ApiRequest,
) -> Result<T, FetchError> {
    let value = api.get(request).await?;
    serde_json::from_value(value).map_err(|e| FetchError::decode(request, e))
}
