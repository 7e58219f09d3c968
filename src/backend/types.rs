//! Wire types for the users backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Role of a user record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account.
    #[default]
    User,
    /// Administrator account.
    Admin,
    /// Any role string the backend sends that we don't know about.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// The role as the backend spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }

    /// The role an admin toggle switches this one to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Admin => Self::User,
            Self::User | Self::Unknown => Self::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user record as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub username: String,
    /// Contact address.
    #[serde(default)]
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
}

/// Every backend payload is wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    /// The wrapped payload; absent or `null` both read as `None`.
    pub data: Option<T>,
}

/// Body of an ask request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// The trimmed question text.
    pub question: String,
    /// How many source records the backend should consider.
    pub top_k: u32,
}

/// Answer returned by the ask endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AskResult {
    /// Generated answer; may be empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: String,
    /// Records the answer was derived from.
    #[serde(default, deserialize_with = "lenient_sources")]
    pub sources: Vec<User>,
}

/// Body of an admin role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleUpdate {
    /// New role.
    pub role: Role,
}

/// Numbers and booleans read as their text; null and structured values as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Non-array `sources` read as empty; entries that aren't user records are skipped.
fn lenient_sources<'de, D>(deserializer: D) -> Result<Vec<User>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_wire_shape() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "username": "ada",
            "email": "ada@example.com",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_unknown_role_is_preserved_as_unknown() {
        let user: User = serde_json::from_value(json!({
            "_id": "u2",
            "username": "bob",
            "email": "bob@example.com",
            "role": "moderator"
        }))
        .unwrap();

        assert_eq!(user.role, Role::Unknown);
    }

    #[test]
    fn test_ask_request_uses_camel_case() {
        let body = serde_json::to_value(AskRequest {
            question: "Who are admins?".into(),
            top_k: 5,
        })
        .unwrap();

        assert_eq!(body, json!({ "question": "Who are admins?", "topK": 5 }));
    }

    #[test]
    fn test_ask_result_tolerates_odd_payloads() {
        let result: AskResult =
            serde_json::from_value(json!({ "answer": null, "sources": "nope" })).unwrap();
        assert_eq!(result, AskResult::default());

        let result: AskResult = serde_json::from_value(json!({
            "answer": "Two admins.",
            "sources": [
                { "_id": "u1", "username": "ada", "email": "a@x", "role": "admin" },
                42
            ]
        }))
        .unwrap();
        assert_eq!(result.answer, "Two admins.");
        assert_eq!(result.sources.len(), 1);
    }

    #[test]
    fn test_ask_answer_coerces_scalars() {
        let result: AskResult = serde_json::from_value(json!({ "answer": 42 })).unwrap();
        assert_eq!(result.answer, "42");

        let result: AskResult = serde_json::from_value(json!({ "answer": true })).unwrap();
        assert_eq!(result.answer, "true");

        let result: AskResult =
            serde_json::from_value(json!({ "answer": { "text": "hi" } })).unwrap();
        assert_eq!(result.answer, "");
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: DataEnvelope<AskResult> = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.data.is_none());

        let envelope: DataEnvelope<AskResult> =
            serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_role_toggle() {
        assert_eq!(Role::Admin.toggled(), Role::User);
        assert_eq!(Role::User.toggled(), Role::Admin);
    }
}
