use std::io;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while decoding records from JSON.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record is not a JSON object")]
    NotAnObject,

    #[error("Record list is not a JSON array")]
    NotAnArray,

    #[error("Field '{field}' has an invalid value: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("Cannot aggregate '{field}' over an empty record set")]
    EmptyInput { field: String },
}

/// Errors raised by report state updates that do not fit the schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Filter kind does not match field '{0}'")]
    FilterKindMismatch(String),

    #[error("Field '{0}' cannot be grouped on")]
    NotGroupable(String),

    #[error("Field '{0}' is listed more than once in the grouping")]
    DuplicateGroupField(String),

    #[error("Field '{0}' is not a measure and cannot be aggregated")]
    NotMeasure(String),
}

impl StateError {
    pub fn log_error(&self) {
        warn!("Rejected report state update: {}", self);
        debug!("Report state error details: {:?}", self);
    }
}

/// Errors raised when writing the persisted state mirror.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when building a saved report definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Report name is required")]
    MissingName,
}
