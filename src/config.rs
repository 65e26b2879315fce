//! Manager configuration
//!
//! Small, YAML-loadable knobs for the orchestrator. Everything defaults
//! to the conservative choice, so `ManagerConfig::default()` is a fully
//! working configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What the resolver does when the selected target has no precomputed
/// patch from the device's current version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPatchPolicy {
    /// Fall back to a full install of the target artifact (default)
    #[default]
    FullInstall,
    /// Generate and publish the missing patch on the fly, then update
    SynthesizeDelta,
}

/// Configuration for [`crate::manager::VersionManager`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ManagerConfig {
    /// Resolver behavior for missing patches
    pub missing_patch: MissingPatchPolicy,
}

impl ManagerConfig {
    /// Parse a configuration from YAML
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OtaError;

    #[test]
    fn test_default_falls_back_to_full_install() {
        assert_eq!(
            ManagerConfig::default().missing_patch,
            MissingPatchPolicy::FullInstall
        );
    }

    #[test]
    fn test_from_yaml() {
        let config = ManagerConfig::from_yaml("missing-patch: synthesize-delta").unwrap();
        assert_eq!(config.missing_patch, MissingPatchPolicy::SynthesizeDelta);
    }

    #[test]
    fn test_from_yaml_empty_uses_defaults() {
        let config = ManagerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ManagerConfig::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = ManagerConfig::from_yaml("missing-patch: [nope").unwrap_err();
        assert!(matches!(err, OtaError::ConfigParseFailed { .. }));
    }
}
