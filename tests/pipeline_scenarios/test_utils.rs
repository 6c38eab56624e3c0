//! Shared fixtures for pipeline scenarios

use recordingest::{
    CanonicalRecord, IngestConfig, Ingestor, MemoryBlobStore, MemoryTableStore, ObjectRef,
    StoreAcknowledgment, StoreError, TableStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TABLE: &str = "users";
pub const BUCKET: &str = "uploads";

/// Ingestor over in-memory stores, with handles kept for inspection
pub struct Harness {
    pub blobs: MemoryBlobStore,
    pub store: Arc<MemoryTableStore>,
    pub ingestor: Ingestor<MemoryBlobStore, Arc<MemoryTableStore>>,
}

impl Harness {
    pub fn new() -> Self {
        let blobs = MemoryBlobStore::new();
        let store = Arc::new(MemoryTableStore::with_tables([TABLE]));
        let ingestor = Ingestor::new(
            blobs.clone(),
            Arc::clone(&store),
            IngestConfig::new(TABLE).unwrap(),
        );
        Self {
            blobs,
            store,
            ingestor,
        }
    }

    /// Put `body` into the bucket and return its reference
    pub fn upload(&self, key: &str, body: &str) -> ObjectRef {
        let object = ObjectRef::new(BUCKET, key);
        self.blobs.put_object(object.clone(), body);
        object
    }
}

/// Table store that answers every write with a fixed status and counts calls
pub struct ScriptedStore {
    status: u16,
    calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TableStore for ScriptedStore {
    fn put_item(
        &self,
        _table: &str,
        _record: &CanonicalRecord,
    ) -> Result<StoreAcknowledgment, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(StoreAcknowledgment::with_status(self.status))
    }
}

/// Table store whose transport always fails
pub struct UnreachableStore;

impl TableStore for UnreachableStore {
    fn put_item(
        &self,
        _table: &str,
        _record: &CanonicalRecord,
    ) -> Result<StoreAcknowledgment, StoreError> {
        Err(StoreError::Unavailable {
            reason: "connection refused".into(),
        })
    }
}
