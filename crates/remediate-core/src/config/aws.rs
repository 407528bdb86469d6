//! AWS session configuration.

use serde::{Deserialize, Serialize};

/// How to build AWS sessions.
///
/// Unset fields fall through to the SDK's default provider chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region override.
    #[serde(default)]
    pub region: Option<String>,

    /// Named profile from the shared config files.
    #[serde(default)]
    pub profile: Option<String>,

    /// Role to assume through STS before calling the target service.
    #[serde(default)]
    pub assume_role_arn: Option<String>,

    /// Session name used when assuming `assume_role_arn`.
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            assume_role_arn: None,
            session_name: default_session_name(),
        }
    }
}

fn default_session_name() -> String {
    "remediate".to_string()
}
