//! Label taxonomy for kdctl-managed Deployments.
//!
//! Labels are merged from three layers, later layers overriding earlier ones:
//!
//! 1. identity: `kdctl.dev/app-name`, the only label used by the selector
//! 2. management: `kdctl.dev/mgmt` and `kdctl.dev/team-owner`
//! 3. user: every config label, prefixed with `kdctl.dev/`

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::ValidationError;

/// Prefix applied to every label kdctl writes.
pub const LABEL_PREFIX: &str = "kdctl.dev";

/// Identity label key.
pub const APP_NAME_LABEL: &str = "kdctl.dev/app-name";

/// Management label marking objects created by kdctl.
pub const MANAGED_BY_LABEL: &str = "kdctl.dev/mgmt";

/// Value of [`MANAGED_BY_LABEL`].
pub const MANAGED_BY_VALUE: &str = "kdctl";

/// Management label holding the owning team.
pub const TEAM_OWNER_LABEL: &str = "kdctl.dev/team-owner";

/// Annotation holding the application description.
pub const APP_INFO_ANNOTATION: &str = "kdctl.dev/app-info";

/// Keys written by kdctl itself.
const RESERVED_KEYS: &[&str] = &[APP_NAME_LABEL, MANAGED_BY_LABEL, TEAM_OWNER_LABEL];

pub type Labels = BTreeMap<String, String>;

/// Prefix a user label key with [`LABEL_PREFIX`].
#[must_use]
pub fn namespaced(key: &str) -> String {
    format!("{LABEL_PREFIX}/{key}")
}

/// How user labels that collide with reserved keys are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Later layers win. The selector keeps the identity value either way.
    #[default]
    LastWins,
    /// Reject the config with [`ValidationError::ReservedLabel`].
    RejectReserved,
}

/// The single label selecting all pods of one workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityLabel {
    value: String,
}

impl IdentityLabel {
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            value: app_name.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        APP_NAME_LABEL
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The identity layer as a label map.
    #[must_use]
    pub fn to_labels(&self) -> Labels {
        BTreeMap::from([(APP_NAME_LABEL.to_string(), self.value.clone())])
    }
}

/// Management layer for a team.
#[must_use]
pub fn management_layer(team: &str) -> Labels {
    BTreeMap::from([
        (MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string()),
        (TEAM_OWNER_LABEL.to_string(), team.to_string()),
    ])
}

/// User layer with every key namespaced.
#[must_use]
pub fn user_layer(labels: &BTreeMap<String, String>) -> Labels {
    labels
        .iter()
        .map(|(k, v)| (namespaced(k), v.clone()))
        .collect()
}

/// Merge the three layers into a new map.
///
/// # Errors
///
/// With [`LabelPolicy::RejectReserved`], returns [`ValidationError::ReservedLabel`]
/// for the first user key that lands on a reserved key.
pub fn merge(
    identity: &IdentityLabel,
    management: Labels,
    user: Labels,
    policy: LabelPolicy,
) -> Result<Labels, ValidationError> {
    let mut merged = identity.to_labels();
    merged.extend(management);

    for (key, value) in user {
        if RESERVED_KEYS.contains(&key.as_str()) {
            match policy {
                LabelPolicy::RejectReserved => {
                    return Err(ValidationError::ReservedLabel { key });
                }
                LabelPolicy::LastWins => {
                    warn!(label = %key, value = %value, "User label overrides a reserved label");
                }
            }
        }
        merged.insert(key, value);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn user_keys_are_namespaced() {
        let layer = user_layer(&user(&[("tier", "backend"), ("env", "prod")]));
        assert_eq!(layer.get("kdctl.dev/tier").map(String::as_str), Some("backend"));
        assert_eq!(layer.get("kdctl.dev/env").map(String::as_str), Some("prod"));
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn merge_layers_in_order() {
        let identity = IdentityLabel::new("billing");
        let merged = merge(
            &identity,
            management_layer("payments"),
            user_layer(&user(&[("tier", "backend")])),
            LabelPolicy::LastWins,
        )
        .unwrap();

        let expected: Labels = [
            ("kdctl.dev/app-name", "billing"),
            ("kdctl.dev/mgmt", "kdctl"),
            ("kdctl.dev/team-owner", "payments"),
            ("kdctl.dev/tier", "backend"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn last_wins_lets_user_override_identity() {
        let identity = IdentityLabel::new("billing");
        let merged = merge(
            &identity,
            management_layer("payments"),
            user_layer(&user(&[("app-name", "hijack")])),
            LabelPolicy::LastWins,
        )
        .unwrap();

        assert_eq!(merged[APP_NAME_LABEL], "hijack");
        assert_eq!(identity.value(), "billing");
    }

    #[test]
    fn reject_reserved_refuses_collisions() {
        let identity = IdentityLabel::new("billing");
        for key in ["app-name", "mgmt", "team-owner"] {
            let err = merge(
                &identity,
                management_layer("payments"),
                user_layer(&user(&[(key, "x")])),
                LabelPolicy::RejectReserved,
            )
            .unwrap_err();
            assert_eq!(
                err,
                ValidationError::ReservedLabel {
                    key: namespaced(key)
                }
            );
        }
    }

    #[test]
    fn reject_reserved_allows_plain_labels() {
        let identity = IdentityLabel::new("billing");
        let merged = merge(
            &identity,
            management_layer("payments"),
            user_layer(&user(&[("tier", "backend")])),
            LabelPolicy::RejectReserved,
        )
        .unwrap();
        assert_eq!(merged.len(), 4);
    }
}
