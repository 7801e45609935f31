//! Locate and parse a JSON object embedded in free text
//!
//! Generated text tends to wrap the requested object in commentary or
//! markdown fences. The span from the first `{` to the last `}` is taken as
//! a coarse bounding box; the JSON parser does the real validation, so braces
//! inside string literals are harmless.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object span pattern is valid"));

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no brace-delimited object found in text")]
    NoObject,

    #[error("embedded object is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("embedded object does not match the expected shape: {0}")]
    ShapeMismatch(String),
}

/// Slice of `text` from the first `{` through the last `}`
pub fn object_span(text: &str) -> Option<&str> {
    OBJECT_SPAN.find(text).map(|m| m.as_str())
}

/// Extract the embedded object as an untyped JSON value
pub fn extract_json_object(text: &str) -> Result<Value, ExtractionError> {
    let span = object_span(text).ok_or(ExtractionError::NoObject)?;
    serde_json::from_str(span).map_err(|e| ExtractionError::InvalidJson(e.to_string()))
}

/// Extract the embedded object and decode it into `T`
pub fn extract_typed<T: DeserializeOwned>(text: &str) -> Result<T, ExtractionError> {
    let value = extract_json_object(text)?;
    serde_json::from_value(value).map_err(|e| ExtractionError::ShapeMismatch(e.to_string()))
}
