//! Error types shared by the builder, the projector and the command layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::client::ClassifiedFailure;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A deployment config field is missing or out of bounds.
///
/// Raised before anything is sent to the cluster.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Numeric field must be greater than zero.
    #[error("field `{field}` must be a positive integer, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// Numeric field exceeds its allowed maximum.
    #[error("field `{field}` must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },

    /// User label collides with a label managed by kdctl.
    #[error("label `{key}` is reserved and cannot be set from the config")]
    ReservedLabel { key: String },
}

/// A Deployment fetched from the cluster lacks data the summary needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("deployment is missing `{0}`")]
    MissingField(&'static str),

    #[error("deployment field `{field}` has unexpected value `{value}`")]
    InvalidField { field: &'static str, value: String },
}

/// Top-level error for kdctl operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for a deployment config.
    #[error("failed to parse deployment config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Built manifest could not be serialized.
    #[error("failed to render manifest: {0}")]
    Render(#[source] serde_yaml::Error),

    #[error("invalid deployment config: {0}")]
    Validation(#[from] ValidationError),

    #[error("unexpected deployment status: {0}")]
    Projection(#[from] ProjectionError),

    /// Summaries could not be written to the output.
    #[error("failed to present status: {0:#}")]
    Present(anyhow::Error),

    /// The cluster rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ClassifiedFailure),
}
