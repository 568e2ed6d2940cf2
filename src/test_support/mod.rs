//! In-memory transport for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiError, ApiRequest, Transport};

/// Answers every request with the same payload and records what was sent.
pub(crate) struct RecordingTransport {
    response: Value,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub(crate) fn always(response: Value) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }
        Ok(self.response.clone())
    }
}
