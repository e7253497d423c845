//! Typed error enum for the service layer.
//!
//! Keeps storage failures and input validation failures apart so handlers
//! can map each to its own response without inspecting messages.

use cardbox_core::FieldErrors;
use cardbox_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage and validation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, write conflict, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller input failed field validation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Whether this error is a write collision between concurrent requests.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_conflict())
    }

    /// Entity name of a not-found error (`"card"`, `"category"`).
    pub fn not_found_entity(&self) -> Option<&'static str> {
        match self {
            Self::Storage(StorageError::NotFound { entity, .. }) => Some(entity),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_storage_errors() {
        let missing = ServiceError::from(StorageError::not_found("card", 7));
        assert!(missing.is_not_found());
        assert!(!missing.is_conflict());
        assert_eq!(missing.not_found_entity(), Some("card"));

        let conflict = ServiceError::from(StorageError::Conflict("database is locked".into()));
        assert!(conflict.is_conflict());
        assert_eq!(conflict.not_found_entity(), None);
    }

    #[test]
    fn validation_is_neither_not_found_nor_conflict() {
        let mut errors = FieldErrors::new();
        errors.add("title", cardbox_core::MSG_REQUIRED);
        let err = ServiceError::from(errors);
        assert!(!err.is_not_found());
        assert!(!err.is_conflict());
        assert!(err.to_string().starts_with("validation failed: title"));
    }
}
