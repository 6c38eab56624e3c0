//! Validator/Normalizer: [`RecordCandidate`] to [`CanonicalRecord`]
//!
//! Gates run in a fixed order and the first failure wins:
//!
//! 1. Non-empty candidate
//! 2. Normalize every key and value (lower-case, then trim)
//! 3. `email` present
//! 4. No keys outside `{email, first_name, last_name}`
//! 5. `email` matches the address grammar over its full span
//!
//! Normalization runs before any key check, so forbidden keys are reported
//! in their normalized form. Name fields get no checks beyond normalization.
//!
//! Validation has no side effects.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::email::is_valid_email;
use crate::error::{IngestError, Result};
use crate::types::{CanonicalRecord, RecordCandidate};

/// Primary key field
pub const EMAIL: &str = "email";
/// Optional given name field
pub const FIRST_NAME: &str = "first_name";
/// Optional family name field
pub const LAST_NAME: &str = "last_name";

/// Every field a canonical record may carry
pub const ALLOWED_FIELDS: [&str; 3] = [EMAIL, FIRST_NAME, LAST_NAME];

/// Lower-case then trim surrounding whitespace
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Normalize all fields; on key collisions the later field wins
fn normalize_fields(candidate: RecordCandidate) -> BTreeMap<String, String> {
    candidate
        .into_iter()
        .map(|(k, v)| (normalize(&k), normalize(&v)))
        .collect()
}

/// Run every gate and build the canonical record
///
/// # Errors
///
/// [`IngestError::EmptyInput`], [`IngestError::MissingField`],
/// [`IngestError::ForbiddenFields`] or [`IngestError::InvalidEmail`],
/// in that order of precedence.
pub fn validate(candidate: RecordCandidate) -> Result<CanonicalRecord> {
    if candidate.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let fields = normalize_fields(candidate);

    let email = fields.get(EMAIL).ok_or_else(|| IngestError::MissingField {
        field: EMAIL.to_string(),
    })?;

    let forbidden: BTreeSet<String> = fields
        .keys()
        .filter(|k| !ALLOWED_FIELDS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !forbidden.is_empty() {
        return Err(IngestError::ForbiddenFields { keys: forbidden });
    }

    if !is_valid_email(email) {
        return Err(IngestError::InvalidEmail {
            value: email.clone(),
        });
    }
    debug!(email = %email, "Email format is valid");

    Ok(CanonicalRecord::from_validated(fields))
}
