use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

const LOGS_ENDPOINT: &str = "https://logs.tf/api/v1/log";

/// Search filters for the log archive. Only non-empty filters become query
/// parameters.
#[derive(Debug, Clone, Default)]
pub struct LogSearchFilters {
    pub title: Option<String>,
    pub map: Option<String>,
    pub uploader: Option<String>,
    pub player: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl LogSearchFilters {
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("title", &self.title),
            ("map", &self.map),
            ("uploader", &self.uploader),
            ("player", &self.player),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }
}

/// One match log from a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSummary {
    pub id: i64,
    pub title: String,
    pub map: String,
    pub players: i64,
}

impl LogSummary {
    fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(Value::as_i64).unwrap_or_default(),
            title: value
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Untitled")
                .to_string(),
            map: value
                .get("map")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            players: value.get("players").and_then(Value::as_i64).unwrap_or_default(),
        }
    }

    pub fn url(&self) -> String {
        format!("https://logs.tf/{}", self.id)
    }
}

#[derive(Debug)]
pub struct LogsGateway {
    transport: Arc<dyn Transport>,
}

impl LogsGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Zero filters short-circuits to an empty result without touching the
    /// network; an unfiltered archive query would be unbounded.
    pub async fn search(&self, filters: &LogSearchFilters) -> Result<Vec<LogSummary>, ApiError> {
        let pairs = filters.query_pairs();
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let mut request = ApiRequest::get(LOGS_ENDPOINT);
        request.query = pairs;
        let response = self.transport.send(request).await?;

        let value: Value = serde_json::from_str(&response.body).map_err(|_| ApiError::Gateway {
            status: response.status,
            body: response.body.clone(),
        })?;

        // the response shape is not ours to control; a missing list is an
        // empty result, not a failure
        Ok(value
            .get("logs")
            .and_then(Value::as_array)
            .map(|logs| logs.iter().map(LogSummary::from_value).collect())
            .unwrap_or_default())
    }
}
