//! Orchestration client trait and common types.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use serde::{Deserialize, Serialize};

use super::failure::ApiFailure;

/// Acknowledgement of a created Deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Deployment name.
    pub name: String,
    /// Namespace the Deployment was created in.
    pub namespace: String,
    /// UID assigned by the API server, if reported.
    pub uid: Option<String>,
}

/// Trait for clients able to create and fetch Deployments.
///
/// Implementations perform at most one request per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrchestrationClient: Send + Sync {
    /// Create a Deployment in `namespace`.
    async fn create(&self, deployment: &Deployment, namespace: &str) -> Result<Ack, ApiFailure>;

    /// Fetch a Deployment by name.
    async fn get(&self, name: &str, namespace: &str) -> Result<Deployment, ApiFailure>;
}
