//! Audit trail configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the remediation audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether audit events are recorded at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Also print a human-readable line per event to stderr.
    #[serde(default)]
    pub stdout: bool,

    /// JSON Lines file events are appended to.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            stdout: false,
            file: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}
