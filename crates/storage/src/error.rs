//! Storage errors and their mapping into the pipeline taxonomy

use ingest_core::{IngestError, ObjectRef};
use thiserror::Error;

/// Failure to read an object from blob storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    /// No object at this location
    #[error("object {object} not found")]
    NotFound {
        /// Requested object
        object: ObjectRef,
    },

    /// Bucket or key cannot be mapped to a storage location
    #[error("invalid object reference {object}: {reason}")]
    InvalidRef {
        /// Requested object
        object: ObjectRef,
        /// Why it was rejected
        reason: String,
    },

    /// Transport or I/O failure
    #[error("reading {object} failed: {reason}")]
    Io {
        /// Requested object
        object: ObjectRef,
        /// Underlying error
        reason: String,
    },
}

impl BlobError {
    /// The object the failed read was for
    pub fn object(&self) -> &ObjectRef {
        match self {
            BlobError::NotFound { object }
            | BlobError::InvalidRef { object, .. }
            | BlobError::Io { object, .. } => object,
        }
    }
}

impl From<BlobError> for IngestError {
    fn from(err: BlobError) -> Self {
        IngestError::FetchFailed {
            object: err.object().clone(),
            reason: err.to_string(),
        }
    }
}

/// Transport-level failure of a table write
///
/// A write that reached the store and came back with a non-OK status is not
/// a `StoreError`; it is a `StoreAcknowledgment` with that status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The destination table does not exist
    #[error("table '{table}' not found")]
    TableNotFound {
        /// Table name
        table: String,
    },

    /// Store could not be reached
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Underlying error
        reason: String,
    },
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        IngestError::StoreWrite {
            status: None,
            reason: err.to_string(),
        }
    }
}
