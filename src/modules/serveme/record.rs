use serde_json::Value;

/// Placeholder for any field the API left out of a response.
pub const MISSING: &str = "N/A";

/// A reservation as returned by the API. The remote shape is only partially
/// under our control, so the record stays an untyped tree behind accessors
/// that map absence to [`MISSING`] instead of panicking.
#[derive(Debug, Clone)]
pub struct ReservationRecord {
    root: Value,
}

impl ReservationRecord {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Create/fetch responses wrap the record in a `"reservation"` envelope;
    /// the prefilled-template endpoint sometimes does not. Tolerate both.
    fn reservation(&self) -> &Value {
        self.root.get("reservation").unwrap_or(&self.root)
    }

    /// Display form of a top-level reservation field.
    pub fn field(&self, key: &str) -> String {
        display_value(self.reservation().get(key))
    }

    /// Display form of a field on the nested `server` object.
    pub fn server_field(&self, key: &str) -> String {
        display_value(self.reservation().get("server").and_then(|s| s.get(key)))
    }

    pub fn id(&self) -> Option<i64> {
        self.reservation().get("id").and_then(Value::as_i64)
    }

    pub fn config_id(&self) -> Option<i64> {
        self.reservation()
            .get("server_config_id")
            .and_then(Value::as_i64)
    }

    /// The server-supplied partial-update endpoint, discovered rather than
    /// constructed client-side.
    pub fn patch_url(&self) -> Option<String> {
        self.reservation()
            .get("actions")
            .and_then(|actions| actions.get("patch"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    /// In-band rejection detail. The API reports errors in the response body
    /// rather than through the HTTP status alone.
    pub fn errors(&self) -> Option<String> {
        let errors = self
            .root
            .get("errors")
            .or_else(|| self.reservation().get("errors"))?;
        if errors.is_null() {
            return None;
        }
        Some(errors.to_string())
    }

    /// The relay connection path, `ip:port`, when the API offered one.
    pub fn sdr_address(&self) -> String {
        let ip = self
            .reservation()
            .get("sdr_ip")
            .and_then(Value::as_str)
            .filter(|ip| !ip.is_empty());
        match (ip, self.reservation().get("sdr_port")) {
            (Some(ip), Some(port)) if !port.is_null() => {
                format!("{}:{}", ip, display_value(Some(port)))
            }
            _ => MISSING.to_string(),
        }
    }
}

/// One entry of a find-servers result. Order is API-defined and preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
    pub location: String,
    pub ip_and_port: String,
}

impl ServerSummary {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: display_value(value.get("id")),
            name: display_value(value.get("name")),
            location: display_value(value.get("location").and_then(|l| l.get("name"))),
            ip_and_port: display_value(value.get("ip_and_port")),
        }
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) if s.is_empty() => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_fields_degrade_to_placeholder() {
        let record = ReservationRecord::new(json!({"reservation": {"id": 42}}));
        assert_eq!(record.field("first_map"), MISSING);
        assert_eq!(record.server_field("ip_and_port"), MISSING);
        assert_eq!(record.sdr_address(), MISSING);
        assert_eq!(record.field("id"), "42");
    }

    #[test]
    fn null_and_empty_values_also_degrade() {
        let record = ReservationRecord::new(json!({
            "reservation": {"password": null, "first_map": ""}
        }));
        assert_eq!(record.field("password"), MISSING);
        assert_eq!(record.field("first_map"), MISSING);
    }

    #[test]
    fn unwrapped_responses_are_tolerated() {
        let record = ReservationRecord::new(json!({"id": 7, "first_map": "cp_process_final"}));
        assert_eq!(record.id(), Some(7));
        assert_eq!(record.field("first_map"), "cp_process_final");
    }

    #[test]
    fn patch_url_requires_a_non_empty_value() {
        let with = ReservationRecord::new(json!({
            "reservation": {"actions": {"patch": "/api/reservations/42"}}
        }));
        assert_eq!(with.patch_url().as_deref(), Some("/api/reservations/42"));

        let empty = ReservationRecord::new(json!({
            "reservation": {"actions": {"patch": ""}}
        }));
        assert_eq!(empty.patch_url(), None);

        let absent = ReservationRecord::new(json!({"reservation": {}}));
        assert_eq!(absent.patch_url(), None);
    }

    #[test]
    fn errors_surface_from_either_level() {
        let top = ReservationRecord::new(json!({"errors": ["ends_at must be after starts_at"]}));
        assert!(top.errors().unwrap().contains("ends_at"));

        let nested = ReservationRecord::new(json!({
            "reservation": {"errors": {"starts_at": ["too soon"]}}
        }));
        assert!(nested.errors().unwrap().contains("too soon"));

        let clean = ReservationRecord::new(json!({"reservation": {"id": 1}}));
        assert_eq!(clean.errors(), None);
    }

    #[test]
    fn sdr_address_joins_ip_and_port() {
        let record = ReservationRecord::new(json!({
            "reservation": {"sdr_ip": "169.254.1.1", "sdr_port": 31234}
        }));
        assert_eq!(record.sdr_address(), "169.254.1.1:31234");
    }

    #[test]
    fn server_summaries_read_nested_location() {
        let summary = ServerSummary::from_value(&json!({
            "id": 1399,
            "name": "BolusBrigade #12",
            "ip_and_port": "bolus.fakkelbrigade.eu:27125",
            "location": {"name": "Chicago", "flag": "us"}
        }));
        assert_eq!(summary.id, "1399");
        assert_eq!(summary.name, "BolusBrigade #12");
        assert_eq!(summary.location, "Chicago");
        assert_eq!(summary.ip_and_port, "bolus.fakkelbrigade.eu:27125");
    }
}
