use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The start-job request finished.
    SubmitCompleted {
        result: Result<SubmitReply, RequestError>,
    },
    /// A status request for `task_id` finished.
    StatusFetched {
        task_id: String,
        result: Result<StatusReport, RequestError>,
    },
    /// The repeating poll timer fired.
    PollTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    pub task_id: Option<String>,
}

/// Decoded body of the task-status endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusReport {
    Pending {
        progress: Option<f64>,
    },
    Success {
        total_occurrences: u64,
        all_pages: Vec<String>,
    },
    Error {
        message: String,
    },
    Unrecognized {
        body: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RequestError {
    pub kind: FailureKind,
    /// Transport text as received; for HTTP error statuses, the response body.
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] RequestError),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine thread stopped")]
    Stopped,
}
