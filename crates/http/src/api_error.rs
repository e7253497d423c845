//! Typed API error for HTTP handlers.
//!
//! Converts service and extractor failures into error envelopes with the
//! matching status code. Handlers return `Result<Envelope<T>, ApiError>`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cardbox_core::{FieldErrors, ParseIdError};
use cardbox_service::ServiceError;

use crate::response_types::Envelope;

pub const VALIDATION_MESSAGE: &str = "Validation failed";
pub const ID_REQUIRED_MESSAGE: &str = "id is required";

/// `Internal` logs the real error server-side and answers with a static
/// message, so storage details never reach the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400, caller sent something unusable (bad id, malformed JSON).
    BadRequest(String),
    /// 400 with the field error map as payload.
    Validation(FieldErrors),
    /// 404, requested record does not exist.
    NotFound(String),
    /// 500, unexpected failure.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => {
                Envelope::<()>::error(StatusCode::BAD_REQUEST, msg, None).into_response()
            },
            Self::Validation(errors) => {
                Envelope::error(StatusCode::BAD_REQUEST, VALIDATION_MESSAGE, Some(errors))
                    .into_response()
            },
            Self::NotFound(msg) => {
                Envelope::<()>::error(StatusCode::NOT_FOUND, msg, None).into_response()
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                Envelope::<()>::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error",
                    None,
                )
                .into_response()
            },
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if let Some(entity) = err.not_found_entity() {
            return Self::NotFound(not_found_message(entity));
        }
        match err {
            ServiceError::Validation(errors) => Self::Validation(errors),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<ParseIdError> for ApiError {
    fn from(err: ParseIdError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// `"card"` becomes `"Card not found"`.
fn not_found_message(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
        None => "Not found".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use cardbox_storage::StorageError;

    use super::*;

    #[test]
    fn not_found_messages_name_the_entity() {
        let err = ApiError::from(ServiceError::from(StorageError::not_found("card", 3)));
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Card not found"));

        let err = ApiError::from(ServiceError::from(StorageError::not_found("category", 3)));
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Category not found"));
    }

    #[test]
    fn conflicts_surface_as_internal() {
        let err = ApiError::from(ServiceError::from(StorageError::Conflict("busy".into())));
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let mut errors = FieldErrors::new();
        errors.add("name", cardbox_core::MSG_REQUIRED);
        let response = ApiError::from(ServiceError::Validation(errors)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
