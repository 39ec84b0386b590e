//! Wire models for the message API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::date::DateToken;

/// A dated, typed text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned identifier, when present.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "id_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Raw date as stored on the server.
    pub date: DateToken,
    /// Free-form category label.
    #[serde(rename = "type")]
    pub kind: String,
    /// Message text.
    #[serde(rename = "message")]
    pub body: String,
}

impl Message {
    /// Creates a message without an identifier.
    #[must_use]
    pub fn new(date: impl Into<DateToken>, kind: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            date: date.into(),
            kind: kind.into(),
            body: body.into(),
        }
    }
}

/// Accepts string ids as-is and renders anything else (e.g. `{"$oid": ..}`) as JSON text.
fn id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Distinct dates and types, loaded together on startup and on retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Distinct dates, in server order.
    pub dates: Vec<DateToken>,
    /// Distinct types, in server order.
    pub types: Vec<String>,
}

/// Database connection information reported by `/db-config`.
///
/// The record is opaque; accessors cover the fields the server is known to send.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig(Value);

impl DatabaseConfig {
    /// Wraps a raw record.
    #[must_use]
    pub const fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Database name.
    #[must_use]
    pub fn database_name(&self) -> Option<&str> {
        self.0.get("database_name").and_then(Value::as_str)
    }

    /// Collection the messages are read from.
    #[must_use]
    pub fn current_collection(&self) -> Option<&str> {
        self.0.get("current_collection").and_then(Value::as_str)
    }

    /// Every collection in the database.
    #[must_use]
    pub fn available_collections(&self) -> Vec<&str> {
        self.0
            .get("available_collections")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of documents in the current collection.
    #[must_use]
    pub fn document_count(&self) -> Option<u64> {
        self.0.get("document_count").and_then(Value::as_u64)
    }

    /// The raw record.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// Pretty-printed JSON for display.
    #[must_use]
    pub fn pretty(&self) -> String {
        pretty(&self.0)
    }
}

/// Outcome of `/repair-messages`.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairReport(Value);

impl RepairReport {
    /// Wraps a raw record.
    #[must_use]
    pub const fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Human-readable summary line.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Number of records whose field casing was fixed.
    #[must_use]
    pub fn repaired_count(&self) -> Option<u64> {
        self.0.get("repaired_count").and_then(Value::as_u64)
    }

    /// Number of records left untouched.
    #[must_use]
    pub fn skipped_count(&self) -> Option<u64> {
        self.0.get("skipped_count").and_then(Value::as_u64)
    }

    /// Number of records inspected.
    #[must_use]
    pub fn total_messages(&self) -> Option<u64> {
        self.0.get("total_messages").and_then(Value::as_u64)
    }

    /// The raw record.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// Pretty-printed JSON for display.
    #[must_use]
    pub fn pretty(&self) -> String {
        pretty(&self.0)
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Reads a JSON array of scalars as strings; `None` if `value` is not an array.
pub(crate) fn strings_from(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Reads a JSON array of messages, skipping malformed items; `None` if not an array.
pub(crate) fn messages_from(value: Value) -> Option<Vec<Message>> {
    let Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Message>(item) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!("Skipping malformed message: {}", e);
                    None
                }
            })
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wire_names() {
        let message: Message = serde_json::from_value(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "date": "2023-01-01",
            "type": "INFO",
            "message": "Message de test 1"
        }))
        .unwrap();
        assert_eq!(message.id.as_deref(), Some("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(message.date.as_str(), "2023-01-01");
        assert_eq!(message.kind, "INFO");
        assert_eq!(message.body, "Message de test 1");
    }

    #[test]
    fn test_message_object_id() {
        let message: Message = serde_json::from_value(json!({
            "_id": {"$oid": "abc"},
            "date": "2023-01-01",
            "type": "INFO",
            "message": "x"
        }))
        .unwrap();
        assert_eq!(message.id.as_deref(), Some(r#"{"$oid":"abc"}"#));
    }

    #[test]
    fn test_messages_skip_malformed() {
        let messages = messages_from(json!([
            {"date": "2023-01-01", "type": "INFO", "message": "kept"},
            {"Date": "2023-01-01", "Type": "INFO", "Message": "wrong casing"},
            {"date": "2023-01-02", "type": "ERROR"}
        ]))
        .unwrap();
        assert_eq!(messages, vec![Message::new("2023-01-01", "INFO", "kept")]);
        assert!(messages_from(json!({"detail": "nope"})).is_none());
    }

    #[test]
    fn test_strings_from_scalars() {
        let strings = strings_from(&json!(["2023-01-01", null, 20230102])).unwrap();
        assert_eq!(strings, vec!["2023-01-01", "", "20230102"]);
        assert!(strings_from(&json!("2023-01-01")).is_none());
    }

    #[test]
    fn test_repair_report_accessors() {
        let report = RepairReport::new(json!({
            "message": "Repair complete. 2 repaired, 18 skipped.",
            "repaired_count": 2,
            "skipped_count": 18,
            "total_messages": 20
        }));
        assert_eq!(
            report.summary(),
            Some("Repair complete. 2 repaired, 18 skipped.")
        );
        assert_eq!(report.repaired_count(), Some(2));
        assert_eq!(report.skipped_count(), Some(18));
        assert_eq!(report.total_messages(), Some(20));
        assert!(report.pretty().contains("\"repaired_count\": 2"));
    }

    #[test]
    fn test_database_config_accessors() {
        let config = DatabaseConfig::new(json!({
            "database_name": "SynapseOS",
            "current_collection": "POC-OMI",
            "available_collections": ["POC-OMI", "logs"],
            "document_count": 20
        }));
        assert_eq!(config.database_name(), Some("SynapseOS"));
        assert_eq!(config.current_collection(), Some("POC-OMI"));
        assert_eq!(config.available_collections(), vec!["POC-OMI", "logs"]);
        assert_eq!(config.document_count(), Some(20));
    }
}
