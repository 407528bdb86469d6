use async_trait::async_trait;
use remediate_core::{Parameters, Resource};

use crate::error::RemediationError;
use crate::session::SessionFactory;

/// A unit of corrective logic that brings one cloud resource into compliance.
///
/// Implementations are stateless: every call to [`fix`](Remediation::fix) is
/// independent, and retrying is the caller's decision.
#[async_trait]
pub trait Remediation: Send + Sync {
    /// Stable identifier policies use to reference this remediation
    /// (`AWS.<Service>.<Fix>`).
    fn id(&self) -> &'static str;

    /// Parameters advertised to callers, with their default values.
    fn default_parameters(&self) -> Parameters {
        Parameters::new()
    }

    /// Apply the fix to `resource`.
    async fn fix(
        &self,
        session: &dyn SessionFactory,
        resource: &Resource,
        parameters: &Parameters,
    ) -> Result<(), RemediationError>;
}
