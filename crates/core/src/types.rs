//! Data model for a single ingested record
//!
//! One upload flows through these types in order:
//! `ObjectRef` -> `RawPayload` -> `RecordCandidate` -> `CanonicalRecord`,
//! and the store answers the final write with a `StoreAcknowledgment`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::validate::EMAIL;

/// Location of an uploaded object: container (bucket) plus object key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Container name
    pub bucket: String,
    /// Object key inside the container
    pub key: String,
}

impl ObjectRef {
    /// Create a new object reference
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Raw object bytes as returned by blob storage
///
/// Content is assumed to be UTF-8 text. The payload is consumed by
/// [`RawPayload::into_text`] and never kept around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    bytes: Vec<u8>,
}

impl RawPayload {
    /// Wrap fetched bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the payload has no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode as UTF-8 text
    pub fn into_text(self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.bytes)
    }
}

/// String-to-string mapping decoded from a payload, before normalization
///
/// Fields keep document order, so when two raw keys normalize to the same
/// key the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCandidate {
    fields: Vec<(String, String)>,
}

impl RecordCandidate {
    /// Create an empty candidate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty candidate with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Number of raw fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate raw fields in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecordCandidate {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for RecordCandidate {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Normalized, schema-valid record ready for persistence
///
/// Only [`crate::validate`] produces one, so every instance holds an
/// `email` that passed the address grammar and no keys outside
/// `{email, first_name, last_name}`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalRecord {
    fields: BTreeMap<String, String>,
}

impl CanonicalRecord {
    pub(crate) fn from_validated(fields: BTreeMap<String, String>) -> Self {
        debug_assert!(fields.contains_key(EMAIL));
        Self { fields }
    }

    /// The primary key
    pub fn email(&self) -> &str {
        self.fields.get(EMAIL).map(String::as_str).unwrap_or_default()
    }

    /// Look up a field by normalized name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Number of fields (at least 1)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Take the underlying map
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }
}

/// Result of a write attempt as reported by the table store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAcknowledgment {
    /// HTTP-style status code; only [`StoreAcknowledgment::STATUS_OK`] means success
    pub status: u16,
    /// Opaque store metadata (request id, version, ...)
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl StoreAcknowledgment {
    /// The store-defined success status
    pub const STATUS_OK: u16 = 200;

    /// Acknowledgment with the given status and no metadata
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            metadata: BTreeMap::new(),
        }
    }

    /// Successful acknowledgment with no metadata
    pub fn ok() -> Self {
        Self::with_status(Self::STATUS_OK)
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if the store accepted the write
    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}
