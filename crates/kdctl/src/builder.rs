//! Translation of a [`DeploymentConfig`] into a Kubernetes `Deployment`.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, ContainerPort, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use tracing::debug;

use crate::config::DeploymentConfig;
use crate::error::ValidationError;
use crate::labels::{self, IdentityLabel, LabelPolicy, APP_INFO_ANNOTATION};

/// Name of the single container port exposed by every workload.
pub const APP_PORT_NAME: &str = "app-service";

/// Builds Deployments from validated configs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecBuilder {
    policy: LabelPolicy,
}

impl SpecBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how user labels colliding with reserved keys are handled.
    #[must_use]
    pub fn with_policy(mut self, policy: LabelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the Deployment for `config`.
    ///
    /// The selector and the pod labels are both derived from one
    /// [`IdentityLabel`], so the selector always matches the pod template.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ReservedLabel`] under
    /// [`LabelPolicy::RejectReserved`] when a user label collides with a
    /// reserved key.
    pub fn build(&self, config: &DeploymentConfig) -> Result<Deployment, ValidationError> {
        let identity = IdentityLabel::new(config.name());
        let labels = labels::merge(
            &identity,
            labels::management_layer(config.team()),
            labels::user_layer(config.labels()),
            self.policy,
        )?;
        let annotations = BTreeMap::from([(
            APP_INFO_ANNOTATION.to_string(),
            config.description().to_string(),
        )]);

        let metadata = ObjectMeta {
            name: Some(config.name().to_string()),
            namespace: Some(config.team().to_string()),
            labels: Some(labels.clone()),
            annotations: Some(annotations.clone()),
            ..ObjectMeta::default()
        };

        let container = Container {
            name: config.name().to_string(),
            image: Some(config.image().to_string()),
            ports: Some(vec![ContainerPort {
                name: Some(APP_PORT_NAME.to_string()),
                container_port: config.port(),
                ..ContainerPort::default()
            }]),
            ..Container::default()
        };

        let template = PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels: Some(labels),
                annotations: Some(annotations),
                ..ObjectMeta::default()
            }),
            spec: Some(PodSpec {
                containers: vec![container],
                ..PodSpec::default()
            }),
        };

        let spec = DeploymentSpec {
            replicas: Some(config.replicas()),
            selector: LabelSelector {
                match_labels: Some(identity.to_labels()),
                ..LabelSelector::default()
            },
            template,
            ..DeploymentSpec::default()
        };

        debug!(
            name = %config.name(),
            namespace = %config.team(),
            replicas = config.replicas(),
            "Built deployment spec"
        );

        Ok(Deployment {
            metadata,
            spec: Some(spec),
            status: None,
        })
    }
}

/// Build a Deployment with the default [`LabelPolicy`].
///
/// # Errors
///
/// See [`SpecBuilder::build`].
pub fn build(config: &DeploymentConfig) -> Result<Deployment, ValidationError> {
    SpecBuilder::new().build(config)
}
