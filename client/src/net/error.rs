//! Error taxonomy for REST calls against the portal backend.
//!
//! ERROR HANDLING
//! ==============
//! Every call site catches these locally and turns them into a toast or an
//! inline message; nothing is escalated to a global handler.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

/// Failure of a single REST exchange.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, CORS, offline).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("request rejected: status {status}")]
    Rejected { status: u16, body: ErrorBody },

    /// A 2xx body could not be parsed into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be assembled (body encoding, form data).
    #[error("request build failed: {0}")]
    Request(String),

    /// Browser-only call made during server rendering.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message suitable for a toast, preferring the backend's own wording.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { body, .. } => body.message().unwrap_or_else(|| fallback.to_owned()),
            Self::Network(_) => "No response received from server".to_owned(),
            Self::Decode(_) | Self::Request(_) | Self::Unavailable => fallback.to_owned(),
        }
    }
}

/// Structured rejection body: either per-field messages or a single string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorBody {
    Fields(BTreeMap<String, Vec<String>>),
    Detail(String),
}

impl ErrorBody {
    /// Parse a raw response body.
    ///
    /// JSON objects become `Fields` (string values become single-element
    /// lists, arrays keep their string members, anything else is rendered
    /// as JSON). JSON strings and non-JSON text become `Detail`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => {
                let fields = map
                    .into_iter()
                    .map(|(key, value)| (key, field_messages(value)))
                    .collect();
                Self::Fields(fields)
            }
            Ok(serde_json::Value::String(s)) => Self::Detail(s),
            _ => Self::Detail(raw.trim().to_owned()),
        }
    }

    /// `"field: message"` lines using the first message per field.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Fields(fields) => fields
                .iter()
                .filter_map(|(key, msgs)| msgs.first().map(|m| format!("{key}: {m}")))
                .collect(),
            Self::Detail(detail) if detail.is_empty() => Vec::new(),
            Self::Detail(detail) => vec![detail.clone()],
        }
    }

    /// First message for `field`, if the body is field-structured.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields.get(field).and_then(|m| m.first()).map(String::as_str),
            Self::Detail(_) => None,
        }
    }

    /// Single headline message: `message`, then `detail`, then the whole detail string.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Fields(_) => self
                .field("message")
                .or_else(|| self.field("detail"))
                .map(str::to_owned),
            Self::Detail(detail) if detail.is_empty() => None,
            Self::Detail(detail) => Some(detail.clone()),
        }
    }
}

fn field_messages(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(s) => vec![s],
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}
