//! Session factory: the capability that hands out service clients.
//!
//! Remediations never build SDK clients themselves. They ask a
//! [`SessionFactory`] for the service they need, which keeps them testable
//! without credentials and lets the caller decide how sessions are made
//! (region, profile, assumed role).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use remediate_core::AwsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::RemediationError;
use crate::rds::{RdsApi, SdkRdsClient};

/// Services a remediation can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Rds,
}

impl Service {
    /// SDK service name (`"rds"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rds => "rds",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client for one service.
#[derive(Clone)]
pub enum ServiceClient {
    Rds(Arc<dyn RdsApi>),
}

impl ServiceClient {
    pub fn service(&self) -> Service {
        match self {
            Self::Rds(_) => Service::Rds,
        }
    }

    pub fn into_rds(self) -> Arc<dyn RdsApi> {
        match self {
            Self::Rds(client) => client,
        }
    }
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceClient").field(&self.service()).finish()
    }
}

/// Yields service clients. Owned by the caller, borrowed by remediations.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn client(&self, service: Service) -> Result<ServiceClient, RemediationError>;
}

/// Session factory backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsSessionFactory {
    config: SdkConfig,
}

impl AwsSessionFactory {
    /// Wrap an already loaded SDK configuration.
    pub fn from_sdk_config(config: SdkConfig) -> Self {
        Self { config }
    }

    /// Load an SDK configuration through the default provider chain,
    /// applying region/profile overrides and, when configured, assuming a
    /// role through STS.
    pub async fn load(settings: &AwsConfig) -> Self {
        let base = loader(settings).load().await;

        let config = match &settings.assume_role_arn {
            None => base,
            Some(role_arn) => {
                tracing::info!(
                    role_arn = %role_arn,
                    session_name = %settings.session_name,
                    "Assuming role for remediation session"
                );
                let provider = aws_config::sts::AssumeRoleProvider::builder(role_arn.clone())
                    .session_name(settings.session_name.clone())
                    .configure(&base)
                    .build()
                    .await;
                loader(settings).credentials_provider(provider).load().await
            }
        };

        tracing::debug!(
            region = ?config.region().map(|r| r.as_ref().to_string()),
            "AWS session configuration loaded"
        );
        Self { config }
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }
}

fn loader(settings: &AwsConfig) -> ConfigLoader {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &settings.profile {
        loader = loader.profile_name(profile);
    }
    loader
}

#[async_trait]
impl SessionFactory for AwsSessionFactory {
    async fn client(&self, service: Service) -> Result<ServiceClient, RemediationError> {
        tracing::debug!(service = %service, "Creating service client");
        match service {
            Service::Rds => {
                let client = aws_sdk_rds::Client::new(&self.config);
                Ok(ServiceClient::Rds(Arc::new(SdkRdsClient::new(client))))
            }
        }
    }
}
