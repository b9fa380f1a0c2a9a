//! Orchestration client.
//!
//! This module contains the [`OrchestrationClient`] trait, the failure
//! classification applied to its errors, and the Kubernetes implementation.

pub mod failure;
pub mod kubernetes;
pub mod traits;

pub use failure::{classify, ApiErrorKind, ApiFailure, ClassifiedFailure};
pub use kubernetes::KubeClient;
pub use traits::{Ack, OrchestrationClient};

#[cfg(test)]
pub use traits::MockOrchestrationClient;
