//! Kubernetes API client implementation.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, info};

use super::failure::ApiFailure;
use super::traits::{Ack, OrchestrationClient};

/// Field manager recorded on objects created by kdctl.
const FIELD_MANAGER: &str = "kdctl";

/// Orchestration client backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeClient {
    /// Kubernetes client.
    client: Client,
}

impl KubeClient {
    /// Create a client from a kubeconfig file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the kubeconfig cannot be read or the client cannot be created.
    pub async fn from_kubeconfig(path: &Path) -> Result<Self> {
        let kubeconfig = Kubeconfig::read_from(path)
            .with_context(|| format!("Failed to read kubeconfig from {}", path.display()))?;

        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .context("Failed to create Kubernetes config from kubeconfig")?;

        let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
        debug!(kubeconfig = %path.display(), "Kubernetes client ready");

        Ok(Self { client })
    }

    /// Create a client from the environment (`KUBECONFIG` or in-cluster config).
    ///
    /// # Errors
    ///
    /// Returns an error if no usable configuration is found.
    pub async fn from_env() -> Result<Self> {
        let client = Client::try_default()
            .await
            .context("Failed to infer Kubernetes client configuration")?;
        debug!("Kubernetes client ready (inferred config)");

        Ok(Self { client })
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Map a `kube` error onto an [`ApiFailure`].
fn to_api_failure(err: kube::Error) -> ApiFailure {
    match err {
        kube::Error::Api(ae) => ApiFailure::with_status(ae.code, ae.message),
        other => ApiFailure::transport(other.to_string()),
    }
}

#[async_trait]
impl OrchestrationClient for KubeClient {
    async fn create(&self, deployment: &Deployment, namespace: &str) -> Result<Ack, ApiFailure> {
        let params = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..PostParams::default()
        };

        let created = self
            .deployments(namespace)
            .create(&params, deployment)
            .await
            .map_err(to_api_failure)?;

        let ack = Ack {
            name: created.metadata.name.unwrap_or_default(),
            namespace: namespace.to_string(),
            uid: created.metadata.uid,
        };
        info!(name = %ack.name, namespace = %ack.namespace, "Deployment created");
        Ok(ack)
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<Deployment, ApiFailure> {
        debug!(name = %name, namespace = %namespace, "Fetching deployment");
        self.deployments(namespace)
            .get(name)
            .await
            .map_err(to_api_failure)
    }
}
