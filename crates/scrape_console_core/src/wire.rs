//! JSON shapes exchanged with the scrape backend.
//!
//! Every response type tolerates missing fields; the backend owns the
//! contract and the console only reads what it needs.

use serde::{Deserialize, Serialize};

/// Body of `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunRequest {
    pub input: String,
    pub output: String,
    pub invalid: String,
}

impl RunRequest {
    /// Builds a request from raw form values, trimming surrounding whitespace.
    pub fn trimmed(input: &str, output: &str, invalid: &str) -> Self {
        Self {
            input: input.trim().to_string(),
            output: output.trim().to_string(),
            invalid: invalid.trim().to_string(),
        }
    }
}

/// Response of `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// One element of the `GET /history` array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub input: String,
    pub output: String,
    pub invalid: String,
}

/// Response of `GET /defaults`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsResponse {
    pub input: Option<String>,
    pub output: Option<String>,
    pub invalid: Option<String>,
}

/// Response of the `GET /pick-*` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PickResponse {
    pub ok: bool,
    pub path: Option<String>,
}

impl PickResponse {
    /// The chosen path, if the dialog returned a usable one.
    pub fn chosen_path(&self) -> Option<&str> {
        match self.path.as_deref() {
            Some(path) if self.ok && !path.is_empty() => Some(path),
            _ => None,
        }
    }
}

/// Outcome of `POST /run` as seen by the console: the HTTP status class plus
/// the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReply {
    pub http_ok: bool,
    pub result: RunResult,
}

impl RunReply {
    pub fn succeeded(&self) -> bool {
        self.http_ok && self.result.ok
    }
}

/// Transport or decoding failure of a backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailed {
    pub detail: String,
}

impl RequestFailed {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
