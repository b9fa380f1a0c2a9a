//! Projection of a fetched Deployment into a display summary.

use chrono::{DateTime, Utc};
use k8s_openapi::api::apps::v1::Deployment;
use serde::Serialize;

use crate::error::ProjectionError;
use crate::labels::{APP_INFO_ANNOTATION, TEAM_OWNER_LABEL};

/// Annotation the deployment controller maintains with the current revision.
pub const REVISION_ANNOTATION: &str = "deployment.kubernetes.io/revision";

/// Display format for creation timestamps, e.g. `Mar 05, 2024 14:07`.
pub const CREATED_AT_FORMAT: &str = "%b %d, %Y %H:%M";

/// Flat, display-ready view of one Deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub team: String,
    pub name: String,
    pub description: String,
    pub revision: u64,
    pub created_at: String,
    pub replicas: i32,
    pub ready_replicas: i32,
    pub available_replicas: i32,
}

/// Format a timestamp with [`CREATED_AT_FORMAT`] in UTC.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(CREATED_AT_FORMAT).to_string()
}

/// Project a Deployment into a [`StatusSummary`].
///
/// Deployments not created by kdctl usually lack the team label or the
/// app-info annotation; those fail with [`ProjectionError::MissingField`]
/// rather than showing placeholder values. Ready and available counts
/// default to zero since the API server omits them when zero.
///
/// # Errors
///
/// Returns [`ProjectionError`] naming the first missing or malformed field.
pub fn project(deployment: &Deployment) -> Result<StatusSummary, ProjectionError> {
    let meta = &deployment.metadata;

    let name = meta
        .name
        .clone()
        .ok_or(ProjectionError::MissingField("metadata.name"))?;

    let team = meta
        .labels
        .as_ref()
        .and_then(|l| l.get(TEAM_OWNER_LABEL))
        .cloned()
        .ok_or(ProjectionError::MissingField(TEAM_OWNER_LABEL))?;

    let annotations = meta.annotations.as_ref();
    let description = annotations
        .and_then(|a| a.get(APP_INFO_ANNOTATION))
        .cloned()
        .ok_or(ProjectionError::MissingField(APP_INFO_ANNOTATION))?;

    let raw_revision = annotations
        .and_then(|a| a.get(REVISION_ANNOTATION))
        .ok_or(ProjectionError::MissingField(REVISION_ANNOTATION))?;
    let revision = raw_revision
        .trim()
        .parse::<u64>()
        .map_err(|_| ProjectionError::InvalidField {
            field: REVISION_ANNOTATION,
            value: raw_revision.clone(),
        })?;

    let created_at = meta
        .creation_timestamp
        .as_ref()
        .map(|ts| format_timestamp(&ts.0))
        .ok_or(ProjectionError::MissingField("metadata.creationTimestamp"))?;

    let replicas = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .ok_or(ProjectionError::MissingField("spec.replicas"))?;

    let status = deployment
        .status
        .as_ref()
        .ok_or(ProjectionError::MissingField("status"))?;

    Ok(StatusSummary {
        team,
        name,
        description,
        revision,
        created_at,
        replicas,
        ready_replicas: status.ready_replicas.unwrap_or(0),
        available_replicas: status.available_replicas.unwrap_or(0),
    })
}
