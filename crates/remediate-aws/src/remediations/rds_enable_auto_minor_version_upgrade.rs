//! Turn on automatic minor engine upgrades for an RDS instance.

use async_trait::async_trait;
use remediate_core::{Parameters, Resource};

use crate::error::RemediationError;
use crate::rds::ModifyDbInstance;
use crate::remediation::Remediation;
use crate::session::{Service, SessionFactory};

/// Whether the change is applied now or in the next maintenance window.
pub const APPLY_IMMEDIATELY: &str = "ApplyImmediately";

/// Sets `AutoMinorVersionUpgrade=true` on the instance named by the
/// resource `Id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsRdsEnableAutoMinorVersionUpgrade;

impl AwsRdsEnableAutoMinorVersionUpgrade {
    pub const ID: &'static str = "AWS.RDS.EnableAutoMinorVersionUpgrade";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Remediation for AwsRdsEnableAutoMinorVersionUpgrade {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn default_parameters(&self) -> Parameters {
        Parameters::new().with(APPLY_IMMEDIATELY, "true")
    }

    async fn fix(
        &self,
        session: &dyn SessionFactory,
        resource: &Resource,
        parameters: &Parameters,
    ) -> Result<(), RemediationError> {
        // Parameters are checked before any client is requested.
        let apply_immediately = parameters.bool(APPLY_IMMEDIATELY)?;

        let rds = session.client(Service::Rds).await?.into_rds();

        tracing::info!(
            instance = %resource.id(),
            apply_immediately,
            "Enabling auto minor version upgrade"
        );

        rds.modify_db_instance(
            ModifyDbInstance::new(resource.id())
                .auto_minor_version_upgrade(true)
                .apply_immediately(apply_immediately),
        )
        .await?;

        Ok(())
    }
}
