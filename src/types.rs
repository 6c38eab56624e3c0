//! Public types for the recordingest API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Data model
// ============================================================================

pub use ingest_core::{CanonicalRecord, ObjectRef, RawPayload, RecordCandidate};

// Store acknowledgment returned by table stores
pub use ingest_core::StoreAcknowledgment;

// Rows as held by the in-memory table
pub use ingest_storage::Row;

// ============================================================================
// Errors
// ============================================================================

pub use ingest_core::{IngestError, JsonKind, Stage};
pub use ingest_config::ConfigError;
pub use ingest_pipeline::EventError;
pub use ingest_storage::{BlobError, StoreError};
