//! recordingest: single-record JSON ingestion.
//!
//! An upload notification names one JSON object. The pipeline fetches it,
//! checks that it is an object of string fields, normalizes it (lower-case,
//! trimmed), validates it against the `{email, first_name, last_name}`
//! schema and upserts it into a table keyed by `email`.
//!
//! ```ignore
//! use recordingest::{IngestConfig, Ingestor, MemoryBlobStore, MemoryTableStore, ObjectRef};
//!
//! let blobs = MemoryBlobStore::new();
//! let store = MemoryTableStore::with_tables(["users"]);
//! let ingestor = Ingestor::new(blobs.clone(), store, IngestConfig::new("users")?);
//!
//! let object = ObjectRef::new("uploads", "jane.json");
//! blobs.put_object(object.clone(), r#"{"Email": " Jane@Example.com "}"#);
//! assert!(ingestor.handle(&object).is_stored());
//! ```

pub mod types;

pub use types::*;

// Stages
pub use ingest_core::{is_valid_email, normalize, parse, validate};
pub use ingest_pipeline::{fetch, upsert};

// Orchestration
pub use ingest_config::IngestConfig;
pub use ingest_pipeline::{Ingestor, Outcome, TriggerEvent};

// Stores
pub use ingest_storage::{BlobStore, FsBlobStore, MemoryBlobStore, MemoryTableStore, TableStore};
