//! In-memory [`ContentSource`] for unit tests.

use super::{ApiRequest, ContentSource};
use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers requests by their display form (`path?k=v&...`). Unknown requests
/// and routes registered with [`FakeContentSource::fail`] return a network
/// error.
#[derive(Default)]
pub struct FakeContentSource {
    routes: HashMap<String, Value>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, request: &str, response: Value) -> Self {
        self.routes.insert(request.to_string(), response);
        self
    }

    pub fn fail(mut self, request: &str) -> Self {
        self.failing.push(request.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl ContentSource for FakeContentSource {
    async fn get(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        let key = request.to_string();
        self.calls.lock().unwrap().push(key.clone());
        if self.failing.contains(&key) {
            return Err(FetchError::network(&key, "connection reset"));
        }
        self.routes
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::network(&key, "no route"))
    }
}
