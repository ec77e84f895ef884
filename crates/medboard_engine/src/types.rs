use std::fmt;

use serde::Deserialize;

/// The event-stream channels the console can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// General activity feed, relayed through the gateway.
    Log,
    /// Final answers, read from the backend's filtered channel.
    Response,
    /// Live progress for a running process submission.
    ProcessProgress,
    /// Live progress for a running research submission.
    ResearchProgress,
}

/// The two submission jobs the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitJob {
    Process,
    Research,
}

/// Explicit operator session issued by the gateway at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}

/// Acknowledgment body returned by the submission gateways.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ack {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One decoded event arrived on a subscription.
    Stream { channel: Channel, data: String },
    /// A subscription ended: backend EOF (`error: None`) or a transport or
    /// HTTP failure. Never emitted for an operator-initiated stop.
    StreamClosed {
        channel: Channel,
        error: Option<StreamError>,
    },
    /// The login call settled.
    LoginCompleted { result: Result<Session, SubmitError> },
    /// A submission call settled.
    SubmitCompleted {
        job: SubmitJob,
        result: Result<Ack, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: SubmitFailure,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: SubmitFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    HttpStatus(u16),
    Timeout,
    Network,
    /// The gateway answered with a body that is not a valid acknowledgment.
    BadReply,
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::HttpStatus(code) => write!(f, "http status {code}"),
            SubmitFailure::Timeout => write!(f, "timeout"),
            SubmitFailure::Network => write!(f, "network error"),
            SubmitFailure::BadReply => write!(f, "bad reply"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct StreamError {
    pub kind: StreamFailure,
    pub message: String,
}

impl StreamError {
    pub(crate) fn new(kind: StreamFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFailure {
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for StreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamFailure::HttpStatus(code) => write!(f, "http status {code}"),
            StreamFailure::Timeout => write!(f, "timeout"),
            StreamFailure::Network => write!(f, "network error"),
        }
    }
}
