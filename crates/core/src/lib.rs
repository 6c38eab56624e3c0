//! Core types for record ingestion
//!
//! This crate holds everything about a record that does not touch I/O:
//! - Data model: [`ObjectRef`], [`RawPayload`], [`RecordCandidate`],
//!   [`CanonicalRecord`], [`StoreAcknowledgment`]
//! - Parser: JSON text to [`RecordCandidate`] ([`parse`])
//! - Validator/Normalizer: [`RecordCandidate`] to [`CanonicalRecord`] ([`validate`])
//! - Error taxonomy shared by every stage ([`IngestError`])
//!
//! Fetching and storing live in `ingest-storage` and `ingest-pipeline`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod email;
pub mod error;
pub mod json;
pub mod parse;
pub mod types;
pub mod validate;

pub use email::is_valid_email;
pub use error::{IngestError, Result, Stage};
pub use json::JsonKind;
pub use parse::parse;
pub use types::{CanonicalRecord, ObjectRef, RawPayload, RecordCandidate, StoreAcknowledgment};
pub use validate::{normalize, validate, ALLOWED_FIELDS, EMAIL, FIRST_NAME, LAST_NAME};
