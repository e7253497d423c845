//! Response types (Serialize)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Operation successful";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Ok,
    Error,
}

/// Body shape shared by every card and category endpoint.
///
/// The HTTP status line always matches `status_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status_code: u16,
    pub status: EnvelopeStatus,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status: EnvelopeStatus::Ok,
            message: SUCCESS_MESSAGE.to_owned(),
            payload: Some(payload),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>, payload: Option<T>) -> Self {
        Self {
            status_code: status.as_u16(),
            status: EnvelopeStatus::Error,
            message: message.into(),
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_shape() {
        let value = serde_json::to_value(Envelope::ok(vec!["Tech"])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "status_code": 200,
                "status": "ok",
                "message": "Operation successful",
                "payload": ["Tech"],
            })
        );
    }

    #[test]
    fn error_envelope_without_payload_serializes_null() {
        let envelope: Envelope<()> = Envelope::error(StatusCode::NOT_FOUND, "Card not found", None);
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["status_code"], 404);
        assert!(value["payload"].is_null());
    }
}
