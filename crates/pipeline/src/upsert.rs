//! Upserter: write a canonical record keyed by `email`
//!
//! Put semantics: the stored row is replaced, never merged. Only the store's
//! OK status counts as success. A single attempt is made.

use ingest_core::{CanonicalRecord, IngestError, Result};
use ingest_storage::TableStore;
use tracing::{debug, info};

/// Write `record` to `table` and return it once the store acknowledges OK
///
/// # Errors
///
/// [`IngestError::StoreWrite`] with the acknowledged status when the store
/// answers anything other than OK, or with no status when the write got no
/// acknowledgment at all.
pub fn upsert<S: TableStore + ?Sized>(
    record: CanonicalRecord,
    store: &S,
    table: &str,
) -> Result<CanonicalRecord> {
    let ack = store.put_item(table, &record)?;
    debug!(status = ack.status, metadata = ?ack.metadata, "Store acknowledged write");

    if !ack.is_ok() {
        return Err(IngestError::StoreWrite {
            status: Some(ack.status),
            reason: format!("bad status code from table '{}'", table),
        });
    }

    info!(table, email = record.email(), "Input data was successfully stored");
    Ok(record)
}
