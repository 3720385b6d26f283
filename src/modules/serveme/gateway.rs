use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::record::{ReservationRecord, ServerSummary};
use super::region::{CredentialKey, Region};
use super::timestamp;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Start/end wall clock for a reservation, in the chosen region's local time.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

/// Everything a create call sends. Built fresh per command invocation.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub window: TimeWindow,
    pub server_id: i64,
    pub server_config_id: Option<i64>,
    pub password: String,
    pub stv_password: String,
    pub rcon: String,
    pub first_map: String,
    pub enable_plugins: bool,
    pub enable_demos: bool,
    pub auto_end: bool,
    pub demo_check: bool,
}

/// Partial update. `None` fields are left out of the PATCH body entirely:
/// the API treats omission as "leave unchanged" and an explicit null as
/// "clear", so absent fields must never be serialized.
#[derive(Debug, Clone, Default)]
pub struct ReservationUpdate {
    pub server_id: Option<i64>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub password: Option<String>,
    pub stv_password: Option<String>,
    pub first_map: Option<String>,
    pub server_config_id: Option<i64>,
    pub enable_plugins: Option<bool>,
    pub enable_demos: Option<bool>,
    pub auto_end: Option<bool>,
}

/// Per-group API keys. Regions 1-7 ride the NA deployment; the other
/// deployments fall back to the NA key when no dedicated key is configured.
#[derive(Clone)]
pub struct RegionKeys {
    na: String,
    eu: String,
    sea: String,
    au: String,
}

impl RegionKeys {
    pub fn new(na: String, eu: Option<String>, sea: Option<String>, au: Option<String>) -> Self {
        Self {
            eu: eu.unwrap_or_else(|| na.clone()),
            sea: sea.unwrap_or_else(|| na.clone()),
            au: au.unwrap_or_else(|| na.clone()),
            na,
        }
    }

    fn key(&self, credential: CredentialKey) -> &str {
        match credential {
            CredentialKey::Na => &self.na,
            CredentialKey::Eu => &self.eu,
            CredentialKey::Sea => &self.sea,
            CredentialKey::Au => &self.au,
        }
    }
}

// Keys must never reach log output, so Debug withholds them.
impl fmt::Debug for RegionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionKeys").finish_non_exhaustive()
    }
}

/// Client for the regional reservation services. Every operation resolves
/// the region's endpoint and credential first, so one deployment of the bot
/// multiplexes across all regional services transparently.
#[derive(Debug)]
pub struct ServemeGateway {
    transport: Arc<dyn Transport>,
    keys: RegionKeys,
}

impl ServemeGateway {
    pub fn new(transport: Arc<dyn Transport>, keys: RegionKeys) -> Self {
        Self { transport, keys }
    }

    fn authed(&self, region: Region, request: ApiRequest) -> ApiRequest {
        request.with_query("api_key", self.keys.key(region.credential()))
    }

    fn window_timestamps(window: &TimeWindow, offset: &str) -> Result<(String, String), ApiError> {
        let starts_at = timestamp::wire(&window.start_date, &window.start_time, offset)?;
        let ends_at = timestamp::wire(&window.end_date, &window.end_time, offset)?;
        Ok((starts_at, ends_at))
    }

    /// The API reports rejection detail in-band, so the body is parsed as
    /// JSON regardless of HTTP status; only an unparseable body is a
    /// gateway failure.
    fn parse_record(response: ApiResponse) -> Result<ReservationRecord, ApiError> {
        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(ReservationRecord::new(value)),
            Err(_) => Err(ApiError::Gateway {
                status: response.status,
                body: response.body,
            }),
        }
    }

    pub async fn create_reservation(
        &self,
        region: Region,
        request: &ReservationRequest,
    ) -> Result<ReservationRecord, ApiError> {
        let offset = region.utc_offset();
        let (starts_at, ends_at) = Self::window_timestamps(&request.window, &offset)?;

        let body = json!({
            "reservation": {
                "starts_at": starts_at,
                "ends_at": ends_at,
                "password": request.password,
                "tv_password": request.stv_password,
                "rcon": request.rcon,
                "first_map": request.first_map,
                "server_id": request.server_id,
                "server_config_id": request.server_config_id,
                "enable_plugins": request.enable_plugins,
                "enable_demos_tf": request.enable_demos,
                "auto_end": request.auto_end,
                // the API flag is inverted relative to the user-facing one
                "disable_democheck": !request.demo_check,
            }
        });

        let url = format!("{}/api/reservations", region.base_url());
        let response = self
            .transport
            .send(self.authed(region, ApiRequest::post(url, body)))
            .await?;
        Self::parse_record(response)
    }

    pub async fn find_servers(
        &self,
        region: Region,
        window: &TimeWindow,
    ) -> Result<Vec<ServerSummary>, ApiError> {
        let (starts_at, ends_at) = Self::window_timestamps(window, &region.utc_offset())?;
        let body = json!({
            "reservation": {
                "starts_at": starts_at,
                "ends_at": ends_at,
            }
        });

        let url = format!("{}/api/reservations/find_servers", region.base_url());
        let response = self
            .transport
            .send(self.authed(region, ApiRequest::post(url, body)))
            .await?;

        let value: Value = serde_json::from_str(&response.body).map_err(|_| ApiError::Gateway {
            status: response.status,
            body: response.body.clone(),
        })?;

        Ok(value
            .get("servers")
            .and_then(Value::as_array)
            .map(|servers| servers.iter().map(ServerSummary::from_value).collect())
            .unwrap_or_default())
    }

    async fn fetch_reservation(
        &self,
        region: Region,
        reservation_id: i64,
    ) -> Result<ReservationRecord, ApiError> {
        let url = format!("{}/api/reservations/{}", region.base_url(), reservation_id);
        let response = self
            .transport
            .send(self.authed(region, ApiRequest::get(url)))
            .await?;
        if !response.is_success() {
            return Err(ApiError::NotFound);
        }
        Self::parse_record(response)
    }

    /// Read-modify-read. The PATCH response is not guaranteed to carry fully
    /// resolved nested state (the server object in particular), so the
    /// authoritative record comes from a final fetch.
    pub async fn update_reservation(
        &self,
        region: Region,
        reservation_id: i64,
        update: &ReservationUpdate,
    ) -> Result<ReservationRecord, ApiError> {
        let current = self.fetch_reservation(region, reservation_id).await?;
        let patch_url = current.patch_url().ok_or(ApiError::NotFound)?;
        let patch_url = if patch_url.starts_with("http") {
            patch_url
        } else {
            format!("{}{}", region.base_url(), patch_url)
        };

        let body = Self::sparse_body(update, &region.utc_offset())?;
        let response = self
            .transport
            .send(self.authed(region, ApiRequest::patch(patch_url, body)))
            .await?;
        if !response.is_success() {
            return Err(ApiError::UpdateRejected {
                status: response.status,
                body: response.body,
            });
        }

        self.fetch_reservation(region, reservation_id).await
    }

    fn sparse_body(update: &ReservationUpdate, offset: &str) -> Result<Value, ApiError> {
        let mut fields = Map::new();

        if let Some(server_id) = update.server_id {
            fields.insert("server_id".to_string(), server_id.into());
        }
        if let (Some(date), Some(time)) = (&update.start_date, &update.start_time) {
            fields.insert(
                "starts_at".to_string(),
                timestamp::wire(date, time, offset)?.into(),
            );
        }
        if let (Some(date), Some(time)) = (&update.end_date, &update.end_time) {
            fields.insert(
                "ends_at".to_string(),
                timestamp::wire(date, time, offset)?.into(),
            );
        }
        for (key, value) in [
            ("password", &update.password),
            ("tv_password", &update.stv_password),
            ("first_map", &update.first_map),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.insert(key.to_string(), value.into());
            }
        }
        if let Some(config_id) = update.server_config_id {
            fields.insert("server_config_id".to_string(), config_id.into());
        }
        for (key, value) in [
            ("enable_plugins", update.enable_plugins),
            ("enable_demos_tf", update.enable_demos),
            ("auto_end", update.auto_end),
        ] {
            if let Some(value) = value {
                fields.insert(key.to_string(), value.into());
            }
        }

        Ok(json!({ "reservation": fields }))
    }

    /// The API's "new reservation" defaults, returned verbatim. Diagnostic.
    pub async fn prefilled_template(&self, region: Region) -> Result<ReservationRecord, ApiError> {
        let url = format!("{}/api/reservations/new", region.base_url());
        let response = self
            .transport
            .send(self.authed(region, ApiRequest::get(url)))
            .await?;
        if !response.is_success() {
            return Err(ApiError::Gateway {
                status: response.status,
                body: response.body,
            });
        }
        Self::parse_record(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StubTransport;
    use reqwest::Method;

    fn gateway(stub: Arc<StubTransport>) -> ServemeGateway {
        ServemeGateway::new(
            stub,
            RegionKeys::new("na-key".to_string(), Some("eu-key".to_string()), None, None),
        )
    }

    fn window() -> TimeWindow {
        TimeWindow {
            start_date: "2024-04-09".to_string(),
            start_time: "21:30".to_string(),
            end_date: "2024-04-09".to_string(),
            end_time: "23:30".to_string(),
        }
    }

    fn request() -> ReservationRequest {
        ReservationRequest {
            window: window(),
            server_id: 5,
            server_config_id: Some(99),
            password: "scrim".to_string(),
            stv_password: "tv".to_string(),
            rcon: "rcon-secret".to_string(),
            first_map: "cp_process_final".to_string(),
            enable_plugins: true,
            enable_demos: true,
            auto_end: true,
            demo_check: true,
        }
    }

    const CREATED: &str = r#"{
        "reservation": {
            "id": 1290,
            "starts_at": "2024-04-09T21:30:00.000-05:00",
            "ends_at": "2024-04-09T23:30:00.000-05:00",
            "first_map": "cp_process_final",
            "enable_plugins": true,
            "server": {"ip_and_port": "chi.serveme.tf:27015", "name": "chi #4"}
        }
    }"#;

    #[tokio::test]
    async fn create_reservation_returns_fixture_fields() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok(
            CREATED,
        )]));
        let record = gateway(stub.clone())
            .create_reservation(Region::UsEst, &request())
            .await
            .unwrap();

        assert_eq!(record.id(), Some(1290));
        assert_eq!(record.field("first_map"), "cp_process_final");
        assert_eq!(record.field("enable_plugins"), "true");
        assert_eq!(record.errors(), None);

        let seen = stub.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].url, "https://na.serveme.tf/api/reservations");
        assert!(seen[0]
            .query
            .contains(&("api_key".to_string(), "na-key".to_string())));

        let body = seen[0].body.as_ref().unwrap();
        let reservation = &body["reservation"];
        assert_eq!(reservation["starts_at"], "2024-04-09T21:30:00.000-05:00");
        assert_eq!(reservation["ends_at"], "2024-04-09T23:30:00.000-05:00");
        assert_eq!(reservation["server_id"], 5);
        assert_eq!(reservation["disable_democheck"], false);
    }

    #[tokio::test]
    async fn create_surfaces_in_band_errors_without_failing() {
        let stub = Arc::new(StubTransport::with_responses(vec![
            StubTransport::with_status(400, r#"{"errors": {"starts_at": ["is too soon"]}}"#),
        ]));
        let record = gateway(stub)
            .create_reservation(Region::UsEst, &request())
            .await
            .unwrap();
        assert!(record.errors().unwrap().contains("too soon"));
    }

    #[tokio::test]
    async fn create_with_unparseable_body_is_a_gateway_error() {
        let stub = Arc::new(StubTransport::with_responses(vec![
            StubTransport::with_status(502, "<html>Bad Gateway</html>"),
        ]));
        let err = gateway(stub)
            .create_reservation(Region::UsEst, &request())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Gateway { status: 502, .. }));
    }

    #[tokio::test]
    async fn create_rejects_malformed_window_before_any_call() {
        let stub = Arc::new(StubTransport::with_responses(vec![]));
        let mut bad = request();
        bad.window.start_time = "25:99".to_string();
        let err = gateway(stub.clone())
            .create_reservation(Region::UsEst, &bad)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat));
        assert!(stub.seen().is_empty());
    }

    #[tokio::test]
    async fn regions_route_to_their_endpoint_and_key() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok(
            r#"{"servers": []}"#,
        )]));
        gateway(stub.clone())
            .find_servers(Region::Europe, &window())
            .await
            .unwrap();

        let seen = stub.seen();
        assert_eq!(seen[0].url, "https://serveme.tf/api/reservations/find_servers");
        assert!(seen[0]
            .query
            .contains(&("api_key".to_string(), "eu-key".to_string())));
        let reservation = &seen[0].body.as_ref().unwrap()["reservation"];
        assert_eq!(reservation["starts_at"], "2024-04-09T21:30:00.000+01:00");
    }

    #[tokio::test]
    async fn find_servers_preserves_api_order() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok(
            r#"{"servers": [
                {"id": 9, "name": "last alphabetically"},
                {"id": 1, "name": "first alphabetically"}
            ]}"#,
        )]));
        let servers = gateway(stub).find_servers(Region::UsEst, &window()).await.unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].id, "9");
        assert_eq!(servers[1].id, "1");
    }

    #[tokio::test]
    async fn find_servers_with_no_servers_key_is_empty() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok("{}")]));
        let servers = gateway(stub).find_servers(Region::UsEst, &window()).await.unwrap();
        assert!(servers.is_empty());
    }

    #[tokio::test]
    async fn rejected_update_surfaces_the_body_and_skips_the_final_fetch() {
        let stub = Arc::new(StubTransport::with_responses(vec![
            StubTransport::ok(r#"{"reservation": {"id": 42, "actions": {"patch": "/api/reservations/42"}}}"#),
            StubTransport::with_status(422, r#"{"errors":["ends_at must be after starts_at"]}"#),
        ]));
        let update = ReservationUpdate {
            end_date: Some("2024-04-09".to_string()),
            end_time: Some("20:00".to_string()),
            ..Default::default()
        };
        let err = gateway(stub.clone())
            .update_reservation(Region::UsEst, 42, &update)
            .await
            .unwrap_err();

        match err {
            ApiError::UpdateRejected { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("ends_at must be after starts_at"));
            }
            other => panic!("expected UpdateRejected, got {other:?}"),
        }

        // only the initial GET and the PATCH went out
        let seen = stub.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].method, Method::GET);
        assert_eq!(seen[1].method, Method::PATCH);
        assert_eq!(seen[1].url, "https://na.serveme.tf/api/reservations/42");
    }

    #[tokio::test]
    async fn update_sends_only_supplied_fields() {
        let stub = Arc::new(StubTransport::with_responses(vec![
            StubTransport::ok(r#"{"reservation": {"id": 42, "actions": {"patch": "/api/reservations/42"}}}"#),
            StubTransport::ok(r#"{"reservation": {"id": 42}}"#),
            StubTransport::ok(r#"{"reservation": {"id": 42, "first_map": "koth_product_final"}}"#),
        ]));
        let update = ReservationUpdate {
            first_map: Some("koth_product_final".to_string()),
            enable_plugins: Some(false),
            ..Default::default()
        };
        let record = gateway(stub.clone())
            .update_reservation(Region::UsEst, 42, &update)
            .await
            .unwrap();
        assert_eq!(record.field("first_map"), "koth_product_final");

        let seen = stub.seen();
        assert_eq!(seen.len(), 3);
        let patched = seen[1].body.as_ref().unwrap()["reservation"]
            .as_object()
            .unwrap()
            .clone();
        assert_eq!(patched.len(), 2);
        assert_eq!(patched["first_map"], "koth_product_final");
        assert_eq!(patched["enable_plugins"], false);
    }

    #[tokio::test]
    async fn update_of_missing_reservation_is_not_found() {
        let stub = Arc::new(StubTransport::with_responses(vec![
            StubTransport::with_status(404, r#"{"error": "not found"}"#),
        ]));
        let err = gateway(stub)
            .update_reservation(Region::UsEst, 999, &ReservationUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn update_without_patch_url_is_not_found() {
        let stub = Arc::new(StubTransport::with_responses(vec![StubTransport::ok(
            r#"{"reservation": {"id": 42}}"#,
        )]));
        let err = gateway(stub.clone())
            .update_reservation(Region::UsEst, 42, &ReservationUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(stub.seen().len(), 1);
    }

    #[tokio::test]
    async fn prefilled_template_requires_success_status() {
        let stub = Arc::new(StubTransport::with_responses(vec![
            StubTransport::with_status(500, r#"{"error": "boom"}"#),
        ]));
        let err = gateway(stub).prefilled_template(Region::UsEst).await.unwrap_err();
        assert!(matches!(err, ApiError::Gateway { status: 500, .. }));
    }
}
