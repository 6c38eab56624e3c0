//! Error taxonomy for the ingestion pipeline
//!
//! Every gate returns `Result<T, IngestError>`. Variants are grouped by the
//! orchestrator stage that can raise them:
//!
//! - Acquire: `FetchFailed`, `Parse`, `Shape`, `NonStringValue`
//! - Persist: `EmptyInput`, `MissingField`, `ForbiddenFields`,
//!   `InvalidEmail`, `StoreWrite`

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::json::JsonKind;
use crate::types::ObjectRef;

/// Result alias used throughout the pipeline
pub type Result<T> = std::result::Result<T, IngestError>;

/// Orchestrator stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Fetch then parse
    Acquire,
    /// Validate then upsert
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Acquire => f.write_str("acquire"),
            Stage::Persist => f.write_str("persist"),
        }
    }
}

/// Failure of one record at one gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Blob storage could not return the object, or it was not UTF-8
    #[error("loading object {object} failed: {reason}")]
    FetchFailed {
        /// The object that was requested
        object: ObjectRef,
        /// Transport or decoding failure
        reason: String,
    },

    /// Text is not valid JSON
    #[error("unable to parse object contents as JSON: {reason}")]
    Parse {
        /// Decoder message
        reason: String,
    },

    /// Top-level JSON value is not an object
    #[error("invalid payload type: expected object, got {actual}")]
    Shape {
        /// What the payload decoded to
        actual: JsonKind,
    },

    /// An object field holds something other than a string
    #[error("field '{key}' must be a string, got {kind}")]
    NonStringValue {
        /// Raw field name
        key: String,
        /// What the field decoded to
        kind: JsonKind,
    },

    /// Payload object has no fields
    #[error("payload is empty")]
    EmptyInput,

    /// A required field is absent after normalization
    #[error("required field '{field}' not found")]
    MissingField {
        /// Normalized field name
        field: String,
    },

    /// Payload carries fields outside the schema
    #[error("payload contains forbidden fields: {}", join_keys(.keys))]
    ForbiddenFields {
        /// Every offending key, normalized
        keys: BTreeSet<String>,
    },

    /// `email` does not match the address grammar over its full span
    #[error("invalid email address: '{value}'")]
    InvalidEmail {
        /// The normalized value that was rejected
        value: String,
    },

    /// Store rejected the write or could not be reached
    #[error("store write failed ({}): {reason}", describe_status(.status))]
    StoreWrite {
        /// Acknowledged status, `None` when no acknowledgment was received
        status: Option<u16>,
        /// Diagnostic message
        reason: String,
    },
}

impl IngestError {
    /// Stage that raises this error
    pub fn stage(&self) -> Stage {
        match self {
            IngestError::FetchFailed { .. }
            | IngestError::Parse { .. }
            | IngestError::Shape { .. }
            | IngestError::NonStringValue { .. } => Stage::Acquire,
            IngestError::EmptyInput
            | IngestError::MissingField { .. }
            | IngestError::ForbiddenFields { .. }
            | IngestError::InvalidEmail { .. }
            | IngestError::StoreWrite { .. } => Stage::Persist,
        }
    }

    /// Stable short name for logs and metrics labels
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::FetchFailed { .. } => "fetch_error",
            IngestError::Parse { .. } => "parse_error",
            IngestError::Shape { .. } => "shape_error",
            IngestError::NonStringValue { .. } => "non_string_value",
            IngestError::EmptyInput => "empty_input",
            IngestError::MissingField { .. } => "missing_field",
            IngestError::ForbiddenFields { .. } => "forbidden_fields",
            IngestError::InvalidEmail { .. } => "invalid_email",
            IngestError::StoreWrite { .. } => "store_write_error",
        }
    }

    /// Whether this error means the record never reached the store
    ///
    /// Only `StoreWrite` involves a write attempt at all.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, IngestError::StoreWrite { .. })
    }
}

fn join_keys(keys: &BTreeSet<String>) -> String {
    keys.iter()
        .map(|k| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no acknowledgment".to_string(),
    }
}
