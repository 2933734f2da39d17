//! Response envelope
//!
//! Uniform success/error JSON wrapper returned by every endpoint, stamped
//! with the current UTC time in RFC3339.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Wire shape shared by every API response.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: String,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Wrap `data` in a success envelope with the given status code.
pub fn success<T: Serialize>(data: T, status: StatusCode) -> Response {
    match serde_json::to_value(data) {
        Ok(data) => (
            status,
            Json(Envelope {
                success: true,
                data: Some(data),
                error: None,
                details: None,
                timestamp: timestamp(),
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("response serialization failed: {}", err);
            error("Internal server error", StatusCode::INTERNAL_SERVER_ERROR, None)
        }
    }
}

/// Wrap an error message in an error envelope with the given status code.
pub fn error(message: &str, status: StatusCode, details: Option<Value>) -> Response {
    (
        status,
        Json(Envelope {
            success: false,
            data: None,
            error: Some(message.to_string()),
            details,
            timestamp: timestamp(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope {
            success: true,
            data: Some(json!({ "status": "healthy" })),
            error: None,
            details: None,
            timestamp: timestamp(),
        };
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["status"], json!("healthy"));
        assert!(value.get("error").is_none());
        assert!(value.get("details").is_none());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = Envelope {
            success: false,
            data: None,
            error: Some("Method not allowed".to_string()),
            details: Some(json!({ "allowed": ["GET"] })),
            timestamp: timestamp(),
        };
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("Method not allowed"));
        assert_eq!(value["details"]["allowed"], json!(["GET"]));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let stamp = timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
        assert!(stamp.ends_with('Z'));
    }
}
