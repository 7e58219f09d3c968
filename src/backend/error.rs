//! Backend client errors and the user-facing message policy.

use serde_json::Value;
use thiserror::Error;

/// Shown when an ask fails without any usable message.
pub const ASK_FAILED: &str = "failed to ask AI";

/// Shown when an admin mutation fails without any usable message.
pub const ADMIN_ACTION_FAILED: &str = "failed to update user";

/// Body fields consulted, in order, for a readable error message.
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "details"];

/// Backend client error type.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, when it was valid JSON.
        body: Option<Value>,
    },

    /// A 2xx body that doesn't match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured URL can't be used as a base for record paths.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Best human-readable message for this failure.
    ///
    /// Response bodies are searched for `message`, then `error`, then
    /// `details`. Failures without a response fall back to the transport
    /// error text. A status error whose body has none of those fields has
    /// no message, and neither does a body that failed to decode.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => body.as_ref().and_then(body_message),
            Self::Transport(err) => non_empty(err.to_string()),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// [`Self::user_message`] or the given fallback.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.user_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn body_message(body: &Value) -> Option<String> {
    MESSAGE_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(field_text))
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(body: Value) -> BackendError {
        BackendError::Status {
            status: 400,
            body: Some(body),
        }
    }

    #[test]
    fn test_message_field_wins() {
        let err = status_error(json!({
            "message": "bad input",
            "error": "ValidationError",
            "details": "question too short"
        }));
        assert_eq!(err.message_or(ASK_FAILED), "bad input");
    }

    #[test]
    fn test_priority_skips_empty_fields() {
        let err = status_error(json!({ "message": "", "error": "Unauthorized" }));
        assert_eq!(err.message_or(ASK_FAILED), "Unauthorized");

        let err = status_error(json!({ "message": null, "details": "topK must be positive" }));
        assert_eq!(err.message_or(ASK_FAILED), "topK must be positive");
    }

    #[test]
    fn test_status_without_fields_falls_back() {
        let err = status_error(json!({ "ok": false }));
        assert_eq!(err.message_or(ASK_FAILED), ASK_FAILED);

        let err = BackendError::Status {
            status: 502,
            body: None,
        };
        assert_eq!(err.message_or(ASK_FAILED), ASK_FAILED);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_non_string_message() {
        let err = status_error(json!({ "message": 42 }));
        assert_eq!(err.message_or(ASK_FAILED), "42");

        let err = status_error(json!({ "message": { "nested": true } }));
        assert_eq!(err.message_or(ASK_FAILED), ASK_FAILED);
    }

    #[test]
    fn test_decode_errors_fall_back() {
        let err: BackendError = serde_json::from_str::<Vec<u32>>("{\"answer\": 42}")
            .unwrap_err()
            .into();
        assert!(matches!(err, BackendError::Decode(_)));
        assert_eq!(err.message_or(ASK_FAILED), ASK_FAILED);
    }

    #[test]
    fn test_display_mirrors_status_code() {
        let err = BackendError::Status {
            status: 500,
            body: None,
        };
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }
}
