//! Blob storage: where uploaded objects are read from
//!
//! The pipeline only needs one call, [`BlobStore::get_object`]. Two
//! implementations ship here:
//!
//! - [`MemoryBlobStore`]: concurrent in-memory map, for tests and demos
//! - [`FsBlobStore`]: one directory per bucket under a root directory

use dashmap::DashMap;
use ingest_core::ObjectRef;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::BlobError;

/// Read access to an object store
pub trait BlobStore: Send + Sync {
    /// Return the full contents of `object`
    ///
    /// One read per call; implementations do not retry.
    fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>, BlobError>;
}

impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>, BlobError> {
        (**self).get_object(object)
    }
}

/// In-memory object store
///
/// Clone shares the same objects.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<DashMap<ObjectRef, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) an object
    pub fn put_object(&self, object: ObjectRef, body: impl Into<Vec<u8>>) {
        self.objects.insert(object, body.into());
    }

    /// Remove an object, returning its contents
    pub fn delete_object(&self, object: &ObjectRef) -> Option<Vec<u8>> {
        self.objects.remove(object).map(|(_, body)| body)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if no objects are stored
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>, BlobError> {
        self.objects
            .get(object)
            .map(|body| body.value().clone())
            .ok_or_else(|| BlobError::NotFound {
                object: object.clone(),
            })
    }
}

/// Filesystem-backed object store
///
/// Bucket `b` and key `dir/file.json` resolve to `<root>/b/dir/file.json`.
/// Keys that would leave the bucket directory (`..`, absolute paths) are
/// rejected.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object reference to a file path
    pub fn resolve(&self, object: &ObjectRef) -> Result<PathBuf, BlobError> {
        let invalid = |reason: &str| BlobError::InvalidRef {
            object: object.clone(),
            reason: reason.to_string(),
        };

        if !is_single_normal_component(&object.bucket) {
            return Err(invalid("bucket must be a single path component"));
        }
        if object.key.is_empty() {
            return Err(invalid("key is empty"));
        }

        let key = Path::new(&object.key);
        if !key.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(invalid("key must be a relative path inside the bucket"));
        }

        Ok(self.root.join(&object.bucket).join(key))
    }
}

fn is_single_normal_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl BlobStore for FsBlobStore {
    fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>, BlobError> {
        let path = self.resolve(object)?;
        debug!(path = %path.display(), "Reading object from filesystem");

        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BlobError::NotFound {
                object: object.clone(),
            },
            _ => BlobError::Io {
                object: object.clone(),
                reason: e.to_string(),
            },
        })
    }
}
