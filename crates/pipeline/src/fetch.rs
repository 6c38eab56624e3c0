//! Fetcher: read an uploaded object and decode it as UTF-8 text
//!
//! Exactly one read per call. Any transport, not-found or decoding failure
//! becomes [`IngestError::FetchFailed`] carrying the object reference.

use ingest_core::{IngestError, ObjectRef, RawPayload, Result};
use ingest_storage::BlobStore;
use tracing::debug;

/// Fetch `object` from `blobs` as text
pub fn fetch<B: BlobStore + ?Sized>(blobs: &B, object: &ObjectRef) -> Result<String> {
    let payload = RawPayload::new(blobs.get_object(object)?);
    debug!(object = %object, bytes = payload.len(), "Fetched object");

    payload.into_text().map_err(|e| IngestError::FetchFailed {
        object: object.clone(),
        reason: format!("object is not valid UTF-8: {}", e),
    })
}
