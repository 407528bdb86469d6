//! Catalog of available remediations, keyed by id.

use remediate_core::Parameters;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RemediationError;
use crate::remediation::Remediation;
use crate::remediations::AwsRdsEnableAutoMinorVersionUpgrade;

#[derive(Clone, Default)]
pub struct RemediationRegistry {
    remediations: BTreeMap<&'static str, Arc<dyn Remediation>>,
}

impl RemediationRegistry {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every remediation shipped with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AwsRdsEnableAutoMinorVersionUpgrade::new()));
        registry
    }

    /// Add a remediation, replacing any previous one with the same id.
    pub fn register(&mut self, remediation: Arc<dyn Remediation>) {
        let id = remediation.id();
        if self.remediations.insert(id, remediation).is_some() {
            tracing::warn!(remediation = id, "Replacing registered remediation");
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn Remediation>, RemediationError> {
        self.remediations
            .get(id)
            .cloned()
            .ok_or_else(|| RemediationError::UnknownRemediation(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.remediations.keys().copied()
    }

    /// Id → advertised default parameters, for every remediation.
    pub fn list(&self) -> BTreeMap<String, Parameters> {
        self.remediations
            .iter()
            .map(|(id, r)| (id.to_string(), r.default_parameters()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.remediations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remediations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_lists_rds_remediation() {
        let registry = RemediationRegistry::builtin();
        let listed = serde_json::to_value(registry.list()).unwrap();
        assert_eq!(
            listed,
            serde_json::json!({
                "AWS.RDS.EnableAutoMinorVersionUpgrade": {"ApplyImmediately": "true"}
            })
        );
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            vec!["AWS.RDS.EnableAutoMinorVersionUpgrade"]
        );
    }

    #[test]
    fn unknown_id() {
        let registry = RemediationRegistry::builtin();
        let err = registry.get("AWS.S3.BlockBucketPublicAccess").err().unwrap();
        assert!(matches!(err, RemediationError::UnknownRemediation(ref id) if id == "AWS.S3.BlockBucketPublicAccess"));
    }

    #[test]
    fn register_replaces_same_id() {
        let mut registry = RemediationRegistry::builtin();
        registry.register(Arc::new(AwsRdsEnableAutoMinorVersionUpgrade::new()));
        assert_eq!(registry.len(), 1);
        assert!(RemediationRegistry::new().is_empty());
    }
}
