//! Decoding of the service's request validation errors.

use serde::Deserialize;
use serde_json::Value;

/// Body of a 422 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpValidationError {
    /// Individual problems
    #[serde(default)]
    pub detail: Vec<ValidationIssue>,
}

/// One rejected request field.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationIssue {
    /// Path to the offending field (strings and array indices)
    #[serde(default)]
    pub loc: Vec<Value>,

    /// Human-readable message
    pub msg: String,

    /// Machine-readable error type
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ValidationIssue {
    /// Dotted field path, e.g. `body.min_confidence`.
    pub fn field(&self) -> String {
        self.loc
            .iter()
            .map(|part| match part {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Summarize a validation error body; falls back to the raw body.
pub fn describe_validation_error(body: &str) -> String {
    match serde_json::from_str::<HttpValidationError>(body) {
        Ok(error) if !error.detail.is_empty() => error
            .detail
            .iter()
            .map(|issue| format!("{}: {}", issue.field(), issue.msg))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}

/// Extract the `detail` message of a generic error body, if it has one.
pub fn describe_server_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Detail {
        detail: String,
    }

    match serde_json::from_str::<Detail>(body) {
        Ok(d) => Some(d.detail),
        Err(_) => Some(body.trim().to_string()).filter(|s| !s.is_empty()),
    }
}
