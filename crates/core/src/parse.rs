//! Decoding of model responses into JSON values.
//!
//! `decode` never panics and never returns a `serde_json` error directly: every failure
//! is folded into a [`DecodeError`] so that the caller can treat it as one more invalid
//! attempt.

use crate::extract::{balanced_object, repair_truncated_array, strip_fences, trim_to_json_bounds};
use crate::DecodeError;
use serde_json::Value;

/// Raw output of the generator, or an object the caller already decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum RawResponse {
    Text(String),
    Parsed(Value),
}

impl From<&str> for RawResponse {
    fn from(value: &str) -> Self {
        RawResponse::Text(value.to_string())
    }
}

impl From<String> for RawResponse {
    fn from(value: String) -> Self {
        RawResponse::Text(value)
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        RawResponse::Parsed(value)
    }
}

/// Which extraction strategy produced the decoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// The caller passed an already-decoded value.
    PreParsed,
    /// The response was valid JSON as-is.
    Direct,
    /// Valid after removing fences and surrounding prose.
    Cleaned,
    /// A truncated top-level array was closed after its last complete element.
    TruncationRepair,
    /// The first complete value was read from the opener; trailing text was ignored.
    FirstValue,
    /// The first balanced `{ ... }` object was sliced out.
    BalancedObject,
}

/// A successfully decoded response.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub strategy: Strategy,
    /// The text that was finally parsed.
    pub candidate: String,
}

fn attempt(candidate: &str, strategy: Strategy) -> Result<Decoded, String> {
    serde_json::from_str::<Value>(candidate)
        .map(|value| Decoded {
            value,
            strategy,
            candidate: candidate.to_string(),
        })
        .map_err(|e| e.to_string())
}

/// Stream one value off the front of `candidate`, leaving anything after it unread.
fn first_value(candidate: &str) -> Result<Decoded, String> {
    let mut stream = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => {
            let read = candidate.get(..stream.byte_offset()).unwrap_or(candidate);
            Ok(Decoded {
                value,
                strategy: Strategy::FirstValue,
                candidate: read.to_string(),
            })
        }
        Some(Err(e)) => Err(e.to_string()),
        None => Err("no JSON value".to_string()),
    }
}

/// Decode a model response, trying each recovery strategy in turn.
///
/// # Errors
///
/// Returns [`DecodeError`] if the response is empty, contains no JSON opener at all, or
/// no strategy produces parseable JSON.
pub fn decode(raw: impl Into<RawResponse>) -> Result<Decoded, DecodeError> {
    let text = match raw.into() {
        RawResponse::Parsed(value) => {
            let candidate = value.to_string();
            return Ok(Decoded {
                value,
                strategy: Strategy::PreParsed,
                candidate,
            });
        }
        RawResponse::Text(text) => text,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    if let Ok(decoded) = attempt(trimmed, Strategy::Direct) {
        return Ok(decoded);
    }

    let cleaned = strip_fences(trimmed);
    let bounded = trim_to_json_bounds(cleaned.trim());
    if bounded.is_empty() {
        tracing::debug!("no JSON opener in {} byte response", text.len());
        return Err(DecodeError::NoJsonFound(text.len()));
    }

    let mut last_error = match attempt(bounded, Strategy::Cleaned) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };

    if let Some(repaired) = repair_truncated_array(bounded) {
        match attempt(&repaired, Strategy::TruncationRepair) {
            Ok(decoded) => {
                tracing::debug!("recovered truncated array response");
                return Ok(decoded);
            }
            Err(e) => last_error = e,
        }
    }

    match first_value(bounded) {
        Ok(decoded) => {
            tracing::debug!("recovered leading JSON value, ignoring trailing text");
            return Ok(decoded);
        }
        Err(e) => last_error = e,
    }

    if let Some(object) = balanced_object(&cleaned) {
        match attempt(object, Strategy::BalancedObject) {
            Ok(decoded) => {
                tracing::debug!("recovered first balanced object from response");
                return Ok(decoded);
            }
            Err(e) => last_error = e,
        }
    }

    Err(DecodeError::Malformed(last_error))
}
