//! Storage adapters for record ingestion
//!
//! The pipeline talks to two external stores through traits:
//! - [`BlobStore`]: read an uploaded object by bucket and key
//! - [`TableStore`]: upsert a canonical record keyed by `email`
//!
//! In-memory and filesystem implementations live here; production clients
//! implement the same traits.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blob;
pub mod error;
pub mod table;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use error::{BlobError, StoreError};
pub use table::{MemoryTableStore, Row, Shard, TableStore};
