//! Configuration types for the remediate tools.
//!
//! Configuration is loaded from a single YAML file (`remediate.yaml` by
//! convention). Every section is optional and falls back to its default, so
//! an empty file is a valid configuration.
//!
//! ```yaml
//! aws:
//!   region: us-east-1
//!   profile: security-audit
//!   assume_role_arn: arn:aws:iam::123456789012:role/RemediationRole
//! audit:
//!   enabled: true
//!   file: logs/remediation-audit.jsonl
//! ```

pub mod audit;
pub mod aws;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use audit::AuditConfig;
pub use aws::AwsConfig;

/// Complete configuration loaded from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemediateConfig {
    /// How sessions against AWS are established.
    #[serde(default)]
    pub aws: AwsConfig,

    /// Audit trail settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RemediateConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml maps an empty document to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(arn) = &self.aws.assume_role_arn {
            if !arn.starts_with("arn:") {
                return Err(ConfigError::Config(format!(
                    "aws.assume_role_arn must be an ARN, got '{}'",
                    arn
                )));
            }
        }
        if self.aws.session_name.is_empty() {
            return Err(ConfigError::Config(
                "aws.session_name must not be empty".to_string(),
            ));
        }
        if matches!(&self.aws.region, Some(r) if r.is_empty()) {
            return Err(ConfigError::Config("aws.region must not be empty".to_string()));
        }
        Ok(())
    }
}
