//! Deployment config loading and validation.
//!
//! The YAML file is read into a [`RawDeploymentConfig`] where every field is
//! optional, then validated once into a [`DeploymentConfig`]. Everything past
//! this module works with the validated type only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result, ValidationError};

/// Highest valid container port.
const MAX_PORT: i64 = 65_535;

/// Deployment config as written in the YAML file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawDeploymentConfig {
    pub name: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub port: Option<i64>,
    pub replicas: Option<i64>,
    pub labels: Option<BTreeMap<String, String>>,
}

/// Validated deployment config.
///
/// Only obtainable through [`TryFrom<RawDeploymentConfig>`], so holding one
/// means every required field is present and in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    name: String,
    team: String,
    description: String,
    image: String,
    port: i32,
    replicas: i32,
    labels: BTreeMap<String, String>,
}

impl DeploymentConfig {
    /// Application name, also used as the Deployment and container name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning team, also used as the namespace.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn port(&self) -> i32 {
        self.port
    }

    #[must_use]
    pub fn replicas(&self) -> i32 {
        self.replicas
    }

    /// User labels, before namespacing.
    #[must_use]
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Parse and validate a config from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed YAML or unknown keys and
    /// [`Error::Validation`] for missing or out-of-range fields.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawDeploymentConfig = serde_yaml::from_str(yaml)?;
        debug!("Deployment config has valid yaml syntax");
        Ok(Self::try_from(raw)?)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path is missing, not a file, or unreadable,
    /// otherwise the errors of [`DeploymentConfig::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            let kind = if path.exists() {
                std::io::ErrorKind::InvalidInput
            } else {
                std::io::ErrorKind::NotFound
            };
            return Err(Error::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(kind, "not a readable file"),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded deployment config");

        Self::from_yaml_str(&text)
    }
}

fn required_string(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn positive_int(value: Option<i64>, field: &'static str, max: i64) -> Result<i32, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    if value > max {
        return Err(ValidationError::OutOfRange { field, value, max });
    }
    i32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value, max })
}

impl TryFrom<RawDeploymentConfig> for DeploymentConfig {
    type Error = ValidationError;

    fn try_from(raw: RawDeploymentConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_string(raw.name, "name")?,
            team: required_string(raw.team, "team")?,
            image: required_string(raw.image, "image")?,
            port: positive_int(raw.port, "port", MAX_PORT)?,
            replicas: positive_int(raw.replicas, "replicas", i64::from(i32::MAX))?,
            description: raw.description.unwrap_or_default(),
            labels: raw.labels.unwrap_or_default(),
        })
    }
}

/// Default kubeconfig location, `$HOME/.kube/config`, if that file exists.
#[must_use]
pub fn default_kubeconfig() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let path = PathBuf::from(home).join(".kube").join("config");
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const BILLING: &str = r#"
name: billing
team: payments
description: billing svc
image: repo/billing:1.2
port: 8080
replicas: 3
labels:
  tier: backend
"#;

    #[test]
    fn parses_complete_config() {
        let config = DeploymentConfig::from_yaml_str(BILLING).unwrap();
        assert_eq!(config.name(), "billing");
        assert_eq!(config.team(), "payments");
        assert_eq!(config.description(), "billing svc");
        assert_eq!(config.image(), "repo/billing:1.2");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.replicas(), 3);
        assert_eq!(config.labels().get("tier").map(String::as_str), Some("backend"));
    }

    #[test]
    fn absent_labels_is_empty_mapping() {
        let yaml = "name: a\nteam: t\nimage: i\nport: 80\nreplicas: 1\n";
        let config = DeploymentConfig::from_yaml_str(yaml).unwrap();
        assert!(config.labels().is_empty());
        assert_eq!(config.description(), "");
    }

    #[test]
    fn rejects_zero_and_negative_replicas() {
        for replicas in ["0", "-1"] {
            let yaml = format!("name: a\nteam: t\nimage: i\nport: 80\nreplicas: {replicas}\n");
            let err = DeploymentConfig::from_yaml_str(&yaml).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Validation(ValidationError::NotPositive { field: "replicas", .. })
                ),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn rejects_missing_and_empty_fields() {
        let missing_image = "name: a\nteam: t\nport: 80\nreplicas: 1\n";
        assert!(matches!(
            DeploymentConfig::from_yaml_str(missing_image),
            Err(Error::Validation(ValidationError::MissingField("image")))
        ));

        let empty_team = "name: a\nteam: ''\nimage: i\nport: 80\nreplicas: 1\n";
        assert!(matches!(
            DeploymentConfig::from_yaml_str(empty_team),
            Err(Error::Validation(ValidationError::MissingField("team")))
        ));
    }

    #[test]
    fn rejects_zero_and_negative_port() {
        for port in ["0", "-1"] {
            let yaml = format!("name: a\nteam: t\nimage: i\nport: {port}\nreplicas: 1\n");
            let err = DeploymentConfig::from_yaml_str(&yaml).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Validation(ValidationError::NotPositive { field: "port", .. })
                ),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        let yaml = "name: ' billing '\nteam: \"payments \"\nimage: ' repo/billing:1.2'\nport: 80\nreplicas: 1\n";
        let config = DeploymentConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.name(), "billing");
        assert_eq!(config.team(), "payments");
        assert_eq!(config.image(), "repo/billing:1.2");
    }

    #[test]
    fn rejects_port_out_of_range() {
        let yaml = "name: a\nteam: t\nimage: i\nport: 70000\nreplicas: 1\n";
        assert!(matches!(
            DeploymentConfig::from_yaml_str(yaml),
            Err(Error::Validation(ValidationError::OutOfRange { field: "port", .. }))
        ));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let yaml = "name: a\nteam: t\nimage: i\nport: 80\nreplicas: 1\nreplica: 2\n";
        assert!(matches!(
            DeploymentConfig::from_yaml_str(yaml),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        assert!(matches!(
            DeploymentConfig::from_yaml_str("name: [unterminated"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BILLING.as_bytes()).unwrap();

        let config = DeploymentConfig::load(file.path()).unwrap();
        assert_eq!(config.name(), "billing");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DeploymentConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        let err = DeploymentConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    #[serial]
    fn default_kubeconfig_uses_home() {
        let home = tempfile::tempdir().unwrap();
        let previous = std::env::var_os("HOME");
        std::env::set_var("HOME", home.path());

        assert_eq!(default_kubeconfig(), None);

        std::fs::create_dir(home.path().join(".kube")).unwrap();
        std::fs::write(home.path().join(".kube").join("config"), "").unwrap();
        assert_eq!(
            default_kubeconfig(),
            Some(home.path().join(".kube").join("config"))
        );

        match previous {
            Some(value) => std::env::set_var("HOME", value),
            None => std::env::remove_var("HOME"),
        }
    }
}
