//! `create` and `get` workflows.
//!
//! The client and the presentation sink are passed in by the caller, so these
//! functions hold no state between invocations and never touch globals.

use tracing::{error, info};

use crate::builder::SpecBuilder;
use crate::client::{Ack, ClassifiedFailure, OrchestrationClient};
use crate::config::DeploymentConfig;
use crate::error::{Error, Result};
use crate::labels::LabelPolicy;
use crate::status::{self, StatusSummary};
use crate::ui::SummarySink;

/// Build the Deployment for `config` and submit it.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the object cannot be built, or
/// [`Error::Api`] with the classified failure if the cluster rejects it.
pub async fn create<C>(client: &C, config: &DeploymentConfig, policy: LabelPolicy) -> Result<Ack>
where
    C: OrchestrationClient + ?Sized,
{
    let deployment = SpecBuilder::new().with_policy(policy).build(config)?;
    let namespace = config.team();

    info!(name = %config.name(), namespace = %namespace, "Creating deployment");
    client
        .create(&deployment, namespace)
        .await
        .map_err(|failure| {
            let classified = ClassifiedFailure::from(failure);
            error!(
                name = %config.name(),
                namespace = %namespace,
                kind = %classified.kind,
                message = %classified.message(),
                "Failed to create deployment"
            );
            Error::Api(classified)
        })
}

/// Render the Deployment for `config` as a YAML manifest without submitting it.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the object cannot be built.
pub fn render(config: &DeploymentConfig, policy: LabelPolicy) -> Result<String> {
    let deployment = SpecBuilder::new().with_policy(policy).build(config)?;
    serde_yaml::to_string(&deployment).map_err(Error::Render)
}

/// Fetch the Deployment `app` owned by `team` and present its summary.
///
/// # Errors
///
/// Returns [`Error::Api`] if the lookup fails, [`Error::Projection`] if the
/// object lacks kdctl metadata, or [`Error::Present`] if the sink fails.
pub async fn get<C, S>(client: &C, sink: &mut S, team: &str, app: &str) -> Result<StatusSummary>
where
    C: OrchestrationClient + ?Sized,
    S: SummarySink + ?Sized,
{
    let summary = fetch_summary(client, team, app).await?;
    sink.present(std::slice::from_ref(&summary))
        .map_err(Error::Present)?;
    Ok(summary)
}

/// Fetch the Deployment `app` owned by `team` and project it.
///
/// # Errors
///
/// See [`get`].
pub async fn fetch_summary<C>(client: &C, team: &str, app: &str) -> Result<StatusSummary>
where
    C: OrchestrationClient + ?Sized,
{
    info!(name = %app, namespace = %team, "Fetching deployment");
    let deployment = client
        .get(app, team)
        .await
        .map_err(|failure| Error::Api(ClassifiedFailure::from(failure)))?;

    Ok(status::project(&deployment)?)
}
