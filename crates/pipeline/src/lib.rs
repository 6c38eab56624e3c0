//! Ingestion pipeline for uploaded JSON records
//!
//! One trigger event names one uploaded object. The [`Ingestor`] fetches it,
//! parses it, validates and normalizes the record, and upserts it into the
//! configured table keyed by `email`:
//!
//! ```ignore
//! use ingest_config::IngestConfig;
//! use ingest_pipeline::{Ingestor, TriggerEvent};
//! use ingest_storage::{FsBlobStore, MemoryTableStore};
//!
//! let config = IngestConfig::from_env()?;
//! let store = MemoryTableStore::with_tables([config.table_name()]);
//! let ingestor = Ingestor::new(FsBlobStore::new("./buckets"), store, config);
//!
//! let event = TriggerEvent::from_json(&text)?;
//! ingestor.handle_event(&event);
//! ```
//!
//! Failures are logged and swallowed per event; see [`orchestrator`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod fetch;
pub mod orchestrator;
pub mod upsert;

pub use event::{EventError, TriggerEvent};
pub use fetch::fetch;
pub use orchestrator::{Ingestor, Outcome};
pub use upsert::upsert;
