//! Reasoner error types.
//!
//! Every reasoner fault is fatal to the dispatch call that raised it: the
//! error propagates to the caller unmodified, aborting any remaining
//! pipeline stages. There is no retry tier.

/// Error from a reasoner API call.
#[derive(Debug)]
pub struct ReasonerError {
    /// The kind of error
    pub kind: ReasonerErrorKind,
    /// HTTP status code, if applicable
    pub status_code: Option<u16>,
    /// Error message, with the upstream payload attached when there is one
    pub message: String,
}

impl ReasonerError {
    /// Create a timeout error.
    pub fn timeout(message: String) -> Self {
        Self {
            kind: ReasonerErrorKind::Timeout,
            status_code: None,
            message,
        }
    }

    /// Create a network error.
    pub fn network(message: String) -> Self {
        Self {
            kind: ReasonerErrorKind::Network,
            status_code: None,
            message,
        }
    }

    /// Create an HTTP error carrying the upstream response body.
    pub fn http(status_code: u16, body: String) -> Self {
        Self {
            kind: ReasonerErrorKind::Http,
            status_code: Some(status_code),
            message: body,
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(message: String) -> Self {
        Self {
            kind: ReasonerErrorKind::MalformedResponse,
            status_code: None,
            message,
        }
    }
}

impl std::fmt::Display for ReasonerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (HTTP {}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ReasonerError {}

/// Classification of reasoner faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonerErrorKind {
    /// The request exceeded the configured timeout
    Timeout,
    /// Connection failed or the transport broke mid-request
    Network,
    /// The endpoint answered with a non-2xx status
    Http,
    /// The endpoint answered 2xx but the body did not expose
    /// `choices[0].message.content`
    MalformedResponse,
}

impl std::fmt::Display for ReasonerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonerErrorKind::Timeout => write!(f, "Reasoner timeout"),
            ReasonerErrorKind::Network => write!(f, "Reasoner unreachable"),
            ReasonerErrorKind::Http => write!(f, "Reasoner error"),
            ReasonerErrorKind::MalformedResponse => write!(f, "Malformed reasoner response"),
        }
    }
}

/// Map a transport-level reqwest error to a fault kind.
pub fn classify_transport_error(error: &reqwest::Error) -> ReasonerErrorKind {
    if error.is_timeout() {
        ReasonerErrorKind::Timeout
    } else {
        ReasonerErrorKind::Network
    }
}
