//! Orchestrator: one trigger event, two stages
//!
//! ```text
//! Acquire:  fetch -> parse        (no store access)
//! Persist:  validate -> upsert    (the only mutating call is last)
//! ```
//!
//! Stages run strictly in order on the calling thread. A failure in either
//! stage is logged with the object reference and turned into
//! [`Outcome::Dropped`]; nothing is retried and no error escapes
//! [`Ingestor::handle`].
//!
//! The ingestor holds no per-invocation state, so one instance can serve
//! concurrent invocations. Two invocations for the same `email` race at the
//! store and the last write wins.

use ingest_config::IngestConfig;
use ingest_core::{
    parse, validate, CanonicalRecord, IngestError, ObjectRef, RecordCandidate, Result, Stage,
};
use ingest_storage::{BlobStore, TableStore};
use tracing::{error, info, warn};

use crate::event::{EventError, TriggerEvent};
use crate::fetch::fetch;
use crate::upsert::upsert;

/// What happened to one trigger event
///
/// Informational only; callers are free to ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The record was written
    Stored {
        /// Source object
        object: ObjectRef,
        /// Primary key of the stored row
        key: String,
    },
    /// The record was rejected or the write failed
    Dropped {
        /// Source object
        object: ObjectRef,
        /// Stage that failed
        stage: Stage,
        /// Why
        error: IngestError,
    },
    /// The event did not name an object
    Ignored {
        /// Why
        error: EventError,
    },
}

impl Outcome {
    /// Check if the record reached the store
    pub fn is_stored(&self) -> bool {
        matches!(self, Outcome::Stored { .. })
    }

    /// The pipeline error, if the record was dropped
    pub fn error(&self) -> Option<&IngestError> {
        match self {
            Outcome::Dropped { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Runs the pipeline for one object per call
///
/// Generic over the blob and table store so production clients, in-memory
/// stores and test doubles plug in the same way.
pub struct Ingestor<B, S> {
    blobs: B,
    store: S,
    config: IngestConfig,
}

impl<B: BlobStore, S: TableStore> Ingestor<B, S> {
    /// Wire an ingestor to its stores
    pub fn new(blobs: B, store: S, config: IngestConfig) -> Self {
        Self {
            blobs,
            store,
            config,
        }
    }

    /// The configuration this ingestor writes with
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Stage 1: fetch then parse
    pub fn acquire(&self, object: &ObjectRef) -> Result<RecordCandidate> {
        let text = fetch(&self.blobs, object)?;
        parse(&text)
    }

    /// Stage 2: validate then upsert
    pub fn persist(&self, candidate: RecordCandidate) -> Result<CanonicalRecord> {
        let record = validate(candidate)?;
        upsert(record, &self.store, self.config.table_name())
    }

    /// Process the object announced by `event`
    pub fn handle_event(&self, event: &TriggerEvent) -> Outcome {
        match event.object_ref() {
            Ok(object) => self.handle(&object),
            Err(error) => {
                warn!(error = %error, "Trigger event not processed");
                Outcome::Ignored { error }
            }
        }
    }

    /// Process one uploaded object end to end
    pub fn handle(&self, object: &ObjectRef) -> Outcome {
        info!(bucket = %object.bucket, key = %object.key, "Processing object");

        let candidate = match self.acquire(object) {
            Ok(candidate) => candidate,
            Err(error) => return self.dropped(object, error),
        };
        info!(key = %object.key, fields = candidate.len(), "Object parsed");

        match self.persist(candidate) {
            Ok(record) => {
                info!(
                    key = %object.key,
                    email = record.email(),
                    "Request processed successfully"
                );
                Outcome::Stored {
                    object: object.clone(),
                    key: record.email().to_string(),
                }
            }
            Err(error) => self.dropped(object, error),
        }
    }

    fn dropped(&self, object: &ObjectRef, error: IngestError) -> Outcome {
        let stage = error.stage();
        if error.is_rejection() {
            warn!(
                key = %object.key,
                bucket = %object.bucket,
                stage = %stage,
                kind = error.kind(),
                error = %error,
                "Request not processed"
            );
        } else {
            error!(
                key = %object.key,
                bucket = %object.bucket,
                stage = %stage,
                kind = error.kind(),
                error = %error,
                "Request not processed"
            );
        }
        Outcome::Dropped {
            object: object.clone(),
            stage,
            error,
        }
    }
}
