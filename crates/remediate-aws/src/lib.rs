//! # remediate-aws
//!
//! Remediation actions against AWS.
//!
//! - [`Remediation`]: one corrective action, identified by a stable id
//! - [`SessionFactory`]: injectable capability handing out service clients
//! - [`RemediationRegistry`]: catalog of shipped remediations
//! - [`Remediator`]: runs one remediation per request, with an audit trail
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use remediate_audit::AuditLogger;
//! use remediate_aws::{AwsSessionFactory, RemediationRegistry, Remediator};
//! use remediate_core::{AwsConfig, Parameters, RemediationRequest, Resource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = AwsSessionFactory::load(&AwsConfig::default()).await;
//! let remediator = Remediator::new(
//!     RemediationRegistry::builtin(),
//!     Arc::new(session),
//!     AuditLogger::disabled(),
//! );
//!
//! remediator
//!     .remediate(&RemediationRequest::new(
//!         "AWS.RDS.EnableAutoMinorVersionUpgrade",
//!         Resource::new("prod-db-1")?,
//!         Parameters::new().with("ApplyImmediately", "false"),
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod rds;
pub mod registry;
pub mod remediation;
pub mod remediations;
pub mod runner;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{ApiError, RemediationError};
pub use rds::{ModifyDbInstance, RdsApi, SdkRdsClient};
pub use registry::RemediationRegistry;
pub use remediation::Remediation;
pub use remediations::AwsRdsEnableAutoMinorVersionUpgrade;
pub use runner::Remediator;
pub use session::{AwsSessionFactory, Service, ServiceClient, SessionFactory};
