//! RDS client seam.

use async_trait::async_trait;
use aws_sdk_rds::error::{DisplayErrorContext, ProvideErrorMetadata};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::session::Service;

/// Arguments of `rds:ModifyDBInstance` that remediations use.
///
/// `None` fields are not sent, leaving the instance setting untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyDbInstance {
    #[serde(rename = "DBInstanceIdentifier")]
    pub db_instance_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_minor_version_upgrade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_immediately: Option<bool>,
}

impl ModifyDbInstance {
    pub fn new(db_instance_identifier: impl Into<String>) -> Self {
        Self {
            db_instance_identifier: db_instance_identifier.into(),
            auto_minor_version_upgrade: None,
            apply_immediately: None,
        }
    }

    pub fn auto_minor_version_upgrade(mut self, enabled: bool) -> Self {
        self.auto_minor_version_upgrade = Some(enabled);
        self
    }

    pub fn apply_immediately(mut self, apply: bool) -> Self {
        self.apply_immediately = Some(apply);
        self
    }
}

/// The RDS operations remediations need.
#[async_trait]
pub trait RdsApi: Send + Sync {
    async fn modify_db_instance(&self, request: ModifyDbInstance) -> Result<(), ApiError>;
}

/// [`RdsApi`] over the AWS SDK.
#[derive(Debug, Clone)]
pub struct SdkRdsClient {
    client: aws_sdk_rds::Client,
}

impl SdkRdsClient {
    pub fn new(client: aws_sdk_rds::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RdsApi for SdkRdsClient {
    async fn modify_db_instance(&self, request: ModifyDbInstance) -> Result<(), ApiError> {
        tracing::debug!(
            instance = %request.db_instance_identifier,
            auto_minor_version_upgrade = ?request.auto_minor_version_upgrade,
            apply_immediately = ?request.apply_immediately,
            "rds:ModifyDBInstance"
        );

        self.client
            .modify_db_instance()
            .db_instance_identifier(request.db_instance_identifier)
            .set_auto_minor_version_upgrade(request.auto_minor_version_upgrade)
            .set_apply_immediately(request.apply_immediately)
            .send()
            .await
            .map_err(|err| {
                let (code, message) = match err.as_service_error() {
                    Some(service_err) => (
                        service_err.code().map(str::to_string),
                        service_err
                            .message()
                            .map(str::to_string)
                            .unwrap_or_else(|| service_err.to_string()),
                    ),
                    None => (None, DisplayErrorContext(&err).to_string()),
                };
                ApiError::new(Service::Rds, "ModifyDBInstance", code, message).with_source(err)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder_leaves_unset_fields_out() {
        let request = ModifyDbInstance::new("db-1").auto_minor_version_upgrade(true);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"DBInstanceIdentifier": "db-1", "AutoMinorVersionUpgrade": true})
        );

        let request = request.apply_immediately(false);
        assert_eq!(request.apply_immediately, Some(false));
    }

    #[test]
    fn sdk_client_wraps_configured_client() {
        let config = aws_sdk_rds::Config::builder()
            .behavior_version(aws_sdk_rds::config::BehaviorVersion::latest())
            .region(aws_sdk_rds::config::Region::new("us-east-1"))
            .credentials_provider(aws_sdk_rds::config::Credentials::new(
                "AKIDEXAMPLE",
                "secret",
                None,
                None,
                "test",
            ))
            .build();
        let client = SdkRdsClient::new(aws_sdk_rds::Client::from_conf(config));
        assert_eq!(
            client.client.config().region().map(|r| r.as_ref()),
            Some("us-east-1")
        );
    }
}
