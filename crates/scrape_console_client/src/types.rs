use std::fmt;

use scrape_console_core::{
    DefaultsResponse, HistoryEntry, PathField, PickResponse, RequestFailed, RequestId, RunReply,
};
use thiserror::Error;

/// Completed backend request, tagged with the token it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Defaults {
        request: RequestId,
        result: Result<DefaultsResponse, ClientError>,
    },
    History {
        request: RequestId,
        result: Result<Vec<HistoryEntry>, ClientError>,
    },
    Picked {
        request: RequestId,
        field: PathField,
        result: Result<PickResponse, ClientError>,
    },
    RunCompleted {
        request: RequestId,
        result: Result<RunReply, ClientError>,
    },
}

impl ClientEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            ClientEvent::Defaults { request, .. }
            | ClientEvent::History { request, .. }
            | ClientEvent::Picked { request, .. }
            | ClientEvent::RunCompleted { request, .. } => *request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ClientError> for RequestFailed {
    fn from(err: ClientError) -> Self {
        RequestFailed::new(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Connect,
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Connect => write!(f, "connection failed"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
