//! Parser: JSON text to [`RecordCandidate`]
//!
//! All-or-nothing. The text must decode to a JSON object whose values are
//! all strings; anything else is rejected without a partial result.

use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::json::JsonKind;
use crate::types::RecordCandidate;

/// Decode `text` into a record candidate
///
/// # Errors
///
/// - [`IngestError::Parse`] if `text` is not valid JSON (including numbers
///   out of `f64` range)
/// - [`IngestError::Shape`] if the top-level value is not an object
/// - [`IngestError::NonStringValue`] if any field is not a string
pub fn parse(text: &str) -> Result<RecordCandidate> {
    let value: Value = serde_json::from_str(text).map_err(|e| IngestError::Parse {
        reason: e.to_string(),
    })?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(IngestError::Shape {
                actual: JsonKind::of(&other),
            })
        }
    };

    let mut candidate = RecordCandidate::with_capacity(object.len());
    for (key, value) in object {
        match value {
            Value::String(s) => candidate.push(key, s),
            other => {
                return Err(IngestError::NonStringValue {
                    kind: JsonKind::of(&other),
                    key,
                })
            }
        }
    }

    debug!(fields = candidate.len(), "Parsed payload");
    Ok(candidate)
}
