//! Declarative application deployments on Kubernetes.
//!
//! An operator describes an application in a small YAML file; kdctl turns it
//! into an `apps/v1 Deployment` and submits it, or fetches an existing one and
//! summarizes its status.
//!
//! ## Architecture
//!
//! ```text
//!  deployment.yaml                                     cluster
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐
//!  │ config::     │──►│ builder::    │──►│ OrchestrationClient  │
//!  │ Deployment-  │   │ SpecBuilder  │   │  • create            │
//!  │ Config       │   └──────────────┘   │  • get               │
//!  └──────────────┘                      └──────────┬───────────┘
//!                                                   │ Deployment
//!                     ┌──────────────┐   ┌──────────▼───────────┐
//!                     │ ui::         │◄──│ status::project      │
//!                     │ SummarySink  │   │  → StatusSummary     │
//!                     └──────────────┘   └──────────────────────┘
//! ```
//!
//! The builder and the projector are pure. API failures are classified by
//! [`client::classify`] into [`ApiErrorKind`].
//!
//! ## Example
//!
//! ```ignore
//! use kdctl::{builder, DeploymentConfig};
//!
//! let config = DeploymentConfig::load(path)?;
//! let deployment = builder::build(&config)?;
//! ```

pub mod builder;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod labels;
pub mod status;
pub mod ui;

pub use builder::{build, SpecBuilder};
pub use client::{
    classify, Ack, ApiErrorKind, ApiFailure, ClassifiedFailure, KubeClient, OrchestrationClient,
};
pub use config::DeploymentConfig;
pub use error::{Error, ProjectionError, Result, ValidationError};
pub use labels::LabelPolicy;
pub use status::{project, StatusSummary};
pub use ui::{JsonSink, SummarySink, TableSink};
