use thiserror::Error;

/// Failure to parse a record identifier from text (query strings, CLI args).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {entity} id: {value:?}")]
pub struct ParseIdError {
    pub entity: &'static str,
    pub value: String,
}
