//! CLI command implementations.

pub mod fix;
pub mod invoke;
pub mod list;

use anyhow::{Context, Result};
use remediate_audit::AuditLogger;
use remediate_aws::{AwsSessionFactory, RemediationRegistry, Remediator};
use remediate_core::RemediateConfig;
use std::sync::Arc;

use crate::GlobalArgs;

/// Parse a `KEY=VALUE` parameter.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Load the config file (if any) and apply command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<RemediateConfig> {
    let mut config = match &global.config {
        Some(path) => RemediateConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => RemediateConfig::default(),
    };

    if let Some(region) = &global.region {
        config.aws.region = Some(region.clone());
    }
    if let Some(profile) = &global.profile {
        config.aws.profile = Some(profile.clone());
    }
    if let Some(role_arn) = &global.role_arn {
        config.aws.assume_role_arn = Some(role_arn.clone());
    }

    config.validate().context("Invalid configuration")?;
    tracing::debug!(
        region = ?config.aws.region,
        profile = ?config.aws.profile,
        assume_role = config.aws.assume_role_arn.is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Build a runner with a live AWS session.
pub async fn build_remediator(config: &RemediateConfig) -> Result<Remediator> {
    let audit = AuditLogger::new(config.audit.clone()).context("Failed to open audit trail")?;
    let session = AwsSessionFactory::load(&config.aws).await;
    let registry = RemediationRegistry::builtin();
    tracing::debug!(remediations = registry.len(), audit = audit.is_enabled(), "Runner ready");
    Ok(Remediator::new(
        registry,
        Arc::new(session),
        audit,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("ApplyImmediately=true").unwrap(),
            ("ApplyImmediately".to_string(), "true".to_string())
        );
        assert_eq!(
            parse_param("Note=a=b").unwrap(),
            ("Note".to_string(), "a=b".to_string())
        );
        assert!(parse_param("ApplyImmediately").is_err());
        assert!(parse_param("=true").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "aws:\n  region: us-east-1\n  profile: base").unwrap();

        let config = load_config(&GlobalArgs {
            config: Some(file.path().to_path_buf()),
            region: Some("ap-southeast-2".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.aws.region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(config.aws.profile.as_deref(), Some("base"));
    }

    #[test]
    fn bad_role_flag_is_rejected() {
        let err = load_config(&GlobalArgs {
            role_arn: Some("not-an-arn".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("assume_role_arn"));
    }
}
