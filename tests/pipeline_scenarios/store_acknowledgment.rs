//! How store answers decide success

use crate::test_utils::{Harness, ScriptedStore, UnreachableStore, BUCKET};
use recordingest::{
    IngestConfig, IngestError, Ingestor, MemoryBlobStore, MemoryTableStore, ObjectRef, Outcome,
    Stage,
};
use std::sync::Arc;

fn upload(blobs: &MemoryBlobStore, body: &str) -> ObjectRef {
    let object = ObjectRef::new(BUCKET, "record.json");
    blobs.put_object(object.clone(), body);
    object
}

#[test]
fn test_non_ok_status_is_store_write_error() {
    let blobs = MemoryBlobStore::new();
    let store = Arc::new(ScriptedStore::with_status(500));
    let ingestor = Ingestor::new(
        blobs.clone(),
        Arc::clone(&store),
        IngestConfig::new("users").unwrap(),
    );
    let object = upload(&blobs, r#"{"email": "a@b.com"}"#);

    match ingestor.handle(&object) {
        Outcome::Dropped { stage, error, .. } => {
            assert_eq!(stage, Stage::Persist);
            assert!(matches!(
                error,
                IngestError::StoreWrite {
                    status: Some(500),
                    ..
                }
            ));
        }
        other => panic!("expected Dropped, got {:?}", other),
    }
    assert_eq!(store.calls(), 1, "exactly one write attempt");
}

#[test]
fn test_ok_status_is_success() {
    let blobs = MemoryBlobStore::new();
    let store = Arc::new(ScriptedStore::with_status(200));
    let ingestor = Ingestor::new(
        blobs.clone(),
        Arc::clone(&store),
        IngestConfig::new("users").unwrap(),
    );
    let object = upload(&blobs, r#"{"email": "a@b.com"}"#);

    assert!(ingestor.handle(&object).is_stored());
    assert_eq!(store.calls(), 1);
}

#[test]
fn test_rejected_record_never_reaches_store() {
    let blobs = MemoryBlobStore::new();
    let store = Arc::new(ScriptedStore::with_status(200));
    let ingestor = Ingestor::new(
        blobs.clone(),
        Arc::clone(&store),
        IngestConfig::new("users").unwrap(),
    );
    let object = upload(&blobs, r#"{"email": "a@b.com", "age": "40"}"#);

    assert!(!ingestor.handle(&object).is_stored());
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_transport_failure_is_store_write_error() {
    let blobs = MemoryBlobStore::new();
    let ingestor = Ingestor::new(
        blobs.clone(),
        UnreachableStore,
        IngestConfig::new("users").unwrap(),
    );
    let object = upload(&blobs, r#"{"email": "a@b.com"}"#);

    let outcome = ingestor.handle(&object);
    match outcome.error() {
        Some(IngestError::StoreWrite { status, reason }) => {
            assert_eq!(*status, None);
            assert!(reason.contains("connection refused"));
        }
        other => panic!("expected StoreWrite, got {:?}", other),
    }
}

#[test]
fn test_configured_table_is_used() {
    let blobs = MemoryBlobStore::new();
    let store = Arc::new(MemoryTableStore::with_tables(["users", "archive"]));
    let ingestor = Ingestor::new(
        blobs.clone(),
        Arc::clone(&store),
        IngestConfig::new("archive").unwrap(),
    );
    let object = upload(&blobs, r#"{"email": "a@b.com"}"#);

    assert!(ingestor.handle(&object).is_stored());
    assert_eq!(store.item_count("archive"), 1);
    assert_eq!(store.item_count("users"), 0);
}

#[test]
fn test_harness_store_acknowledges_with_metadata() {
    let h = Harness::new();
    let object = h.upload("a.json", r#"{"email": "a@b.com"}"#);
    assert!(h.ingestor.handle(&object).is_stored());
    assert_eq!(h.store.version(), 1);
}
