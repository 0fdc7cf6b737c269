use serde::{Deserialize, Serialize};

/// Body of `POST /api/broadcast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BroadcastRequest {
    pub message: String,
}

/// Reply from `POST /api/broadcast`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BroadcastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BroadcastResponse {
    /// Number of users the message reached, 0 when absent
    pub fn success_count(&self) -> u64 {
        self.success.unwrap_or(0)
    }

    /// Number of users the message could not reach, 0 when absent
    pub fn fail_count(&self) -> u64 {
        self.fail.unwrap_or(0)
    }

    /// Application-level error text. An empty string counts as no error.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reply_defaults_to_zero() {
        let reply: BroadcastResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(reply.success_count(), 0);
        assert_eq!(reply.fail_count(), 0);
        assert!(reply.error_message().is_none());
    }

    #[test]
    fn test_empty_error_string_is_not_an_error() {
        let reply: BroadcastResponse =
            serde_json::from_str(r#"{"success": 3, "error": ""}"#).expect("parse");
        assert!(reply.error_message().is_none());
        assert_eq!(reply.success_count(), 3);
    }

    #[test]
    fn test_request_serializes_message_field() {
        let body = BroadcastRequest {
            message: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            serde_json::json!({"message": "hi"})
        );
    }
}
