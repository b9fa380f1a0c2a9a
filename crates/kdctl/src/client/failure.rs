//! API failure classification.
//!
//! Failures coming back from the cluster are reduced to a small closed set of
//! kinds. The mapping is a static `(status code, kind)` table so that new codes
//! can be added without touching any call site.

use thiserror::Error;

/// Failure reported by an [`OrchestrationClient`](super::OrchestrationClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status code, or `None` when no response was received.
    pub status: Option<u16>,
    /// Message from the API server or transport layer.
    pub message: String,
}

impl ApiFailure {
    /// Failure carrying a status code returned by the API server.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Failure raised before any response was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(code) => write!(f, "API error: {code} - {}", self.message),
            None => write!(f, "transport error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// Kind of an API failure as seen by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// An object with the same identity already exists.
    AlreadyExists,
    /// The object was rejected as structurally or semantically invalid.
    InvalidSpec,
    /// The API server could not be reached.
    Unreachable,
    /// Any other server-side failure.
    Unknown,
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "already exists"),
            Self::InvalidSpec => write!(f, "invalid spec"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Status code to failure kind. Codes not listed here are [`ApiErrorKind::Unknown`].
const CLASSIFICATION: &[(u16, ApiErrorKind)] = &[
    (400, ApiErrorKind::InvalidSpec),
    (409, ApiErrorKind::AlreadyExists),
];

/// Classify an API failure.
#[must_use]
pub fn classify(failure: &ApiFailure) -> ApiErrorKind {
    let Some(code) = failure.status else {
        return ApiErrorKind::Unreachable;
    };

    CLASSIFICATION
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(ApiErrorKind::Unknown, |(_, kind)| *kind)
}

/// An [`ApiFailure`] together with its classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {failure}")]
pub struct ClassifiedFailure {
    pub kind: ApiErrorKind,
    pub failure: ApiFailure,
}

impl ClassifiedFailure {
    /// Original message reported by the API server or transport.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.failure.message
    }
}

impl From<ApiFailure> for ClassifiedFailure {
    fn from(failure: ApiFailure) -> Self {
        Self {
            kind: classify(&failure),
            failure,
        }
    }
}
