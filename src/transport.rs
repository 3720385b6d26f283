use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One outbound API call. Query pairs are kept separate from the URL so the
/// HTTP layer can escape them and so log lines never carry API keys.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PATCH,
            url: url.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between gateway logic and the network, so gateways can be exercised
/// against canned responses.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(REQUEST_TIMEOUT)
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Gateway {
            status: 0,
            body: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Gateway {
            status,
            body: e.to_string(),
        })?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Canned-response transport that records every request it sees.
    #[derive(Debug, Default)]
    pub struct StubTransport {
        responses: Mutex<VecDeque<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl StubTransport {
        pub fn with_responses(responses: Vec<ApiResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(body: &str) -> ApiResponse {
            ApiResponse {
                status: 200,
                body: body.to_string(),
            }
        }

        pub fn with_status(status: u16, body: &str) -> ApiResponse {
            ApiResponse {
                status,
                body: body.to_string(),
            }
        }

        pub fn seen(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(ApiError::Gateway {
                    status: 0,
                    body: "no stubbed response".to_string(),
                })
        }
    }
}
