use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// One STV demo from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    pub id: i64,
    pub name: String,
    pub map: String,
    pub url: String,
}

impl DemoSummary {
    fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(Value::as_i64).unwrap_or_default(),
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Untitled")
                .to_string(),
            map: value
                .get("map")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            url: value
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn page_url(&self) -> String {
        format!("https://demos.tf/{}", self.id)
    }
}

#[derive(Debug)]
pub struct DemosGateway {
    transport: Arc<dyn Transport>,
}

impl DemosGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Recent uploads for a SteamID64. The archive answers with a bare JSON
    /// array; anything else is treated as empty.
    pub async fn recent(&self, steam_id: &str, limit: u32) -> Result<Vec<DemoSummary>, ApiError> {
        let url = format!("https://api.demos.tf/demos/{}", steam_id);
        let request = ApiRequest::get(url).with_query("limit", limit.to_string());
        let response = self.transport.send(request).await?;

        let value: Value = serde_json::from_str(&response.body).map_err(|_| ApiError::Gateway {
            status: response.status,
            body: response.body.clone(),
        })?;

        Ok(value
            .as_array()
            .map(|demos| demos.iter().map(DemoSummary::from_value).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StubTransport;

    #[tokio::test]
    async fn recent_parses_the_bare_array() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok(
            r#"[{"id": 901, "name": "scrim vs mix", "map": "cp_snakewater_final1", "url": "https://static.demos.tf/901.dem"}]"#,
        )]));
        let demos = DemosGateway::new(stub.clone())
            .recent("76561198012345678", 5)
            .await
            .unwrap();

        assert_eq!(demos.len(), 1);
        assert_eq!(demos[0].id, 901);
        assert_eq!(demos[0].page_url(), "https://demos.tf/901");

        let seen = stub.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://api.demos.tf/demos/76561198012345678");
        assert_eq!(seen[0].query, vec![("limit".to_string(), "5".to_string())]);
    }

    #[tokio::test]
    async fn non_array_body_is_an_empty_result() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok(
            r#"{"error": "no such profile"}"#,
        )]));
        let demos = DemosGateway::new(stub).recent("0", 5).await.unwrap();
        assert!(demos.is_empty());
    }
}
