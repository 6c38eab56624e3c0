//! Trigger event decoding
//!
//! Uploads are announced with an object-created notification:
//!
//! ```json
//! {"Records": [{"s3": {"bucket": {"name": "uploads"}, "object": {"key": "a.json"}}}]}
//! ```
//!
//! Only the bucket name and object key of the first record are used.
//! Everything else in the envelope is ignored.

use ingest_core::ObjectRef;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// The envelope could not be turned into an object reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Not JSON, or missing bucket/key fields
    #[error("malformed trigger event: {reason}")]
    Malformed {
        /// Decoder message
        reason: String,
    },

    /// `Records` is empty or absent
    #[error("trigger event has no records")]
    NoRecords,
}

/// Decoded object-created notification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "Records", default)]
    records: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct EventRecord {
    s3: S3Entity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct S3Entity {
    bucket: BucketEntity,
    object: ObjectEntity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ObjectEntity {
    key: String,
}

impl TriggerEvent {
    /// Decode an event from JSON text
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        serde_json::from_str(text).map_err(|e| EventError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Decode an event from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, EventError> {
        serde_json::from_value(value).map_err(|e| EventError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Build an event announcing a single object
    pub fn for_object(object: &ObjectRef) -> Self {
        Self {
            records: vec![EventRecord {
                s3: S3Entity {
                    bucket: BucketEntity {
                        name: object.bucket.clone(),
                    },
                    object: ObjectEntity {
                        key: object.key.clone(),
                    },
                },
            }],
        }
    }

    /// Number of records in the envelope
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The object announced by the first record
    ///
    /// Additional records are not processed; a warning is logged.
    pub fn object_ref(&self) -> Result<ObjectRef, EventError> {
        let first = self.records.first().ok_or(EventError::NoRecords)?;
        if self.records.len() > 1 {
            warn!(
                records = self.records.len(),
                "Trigger event carries several records, only the first is processed"
            );
        }
        Ok(ObjectRef::new(&first.s3.bucket.name, &first.s3.object.key))
    }
}
