use remediate_audit::AuditLogger;
use remediate_core::{Invocation, RemediationRequest};
use std::sync::Arc;
use std::time::Instant;

use crate::error::RemediationError;
use crate::registry::RemediationRegistry;
use crate::session::SessionFactory;

/// Runs one named remediation per call and records it in the audit trail.
///
/// Selection of what to remediate, batching and retries belong to the
/// caller.
pub struct Remediator {
    registry: RemediationRegistry,
    session: Arc<dyn SessionFactory>,
    audit: AuditLogger,
}

impl Remediator {
    pub fn new(
        registry: RemediationRegistry,
        session: Arc<dyn SessionFactory>,
        audit: AuditLogger,
    ) -> Self {
        Self {
            registry,
            session,
            audit,
        }
    }

    pub fn registry(&self) -> &RemediationRegistry {
        &self.registry
    }

    /// Run the remediation named by `request` exactly once.
    ///
    /// Parameters the request omits are filled from the remediation's
    /// advertised defaults.
    pub async fn remediate(&self, request: &RemediationRequest) -> Result<(), RemediationError> {
        let resource_id = request.resource.id();

        let remediation = match self.registry.get(&request.remediation_id) {
            Ok(remediation) => remediation,
            Err(err) => {
                if let Err(audit_err) = self
                    .audit
                    .log_failed(None, &request.remediation_id, resource_id, &err.to_string(), None)
                    .await
                {
                    tracing::error!(error = %audit_err, "Failed to record unknown remediation");
                }
                return Err(err);
            }
        };

        let parameters = request
            .parameters
            .with_defaults(&remediation.default_parameters());

        let run_id = self
            .audit
            .log_requested(remediation.id(), resource_id, &parameters)
            .await?;

        tracing::info!(
            remediation = remediation.id(),
            resource = resource_id,
            run_id = %run_id,
            "Running remediation"
        );

        let started = Instant::now();
        let result = remediation
            .fix(self.session.as_ref(), &request.resource, &parameters)
            .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                tracing::info!(
                    remediation = remediation.id(),
                    resource = resource_id,
                    duration_ms,
                    "Remediation succeeded"
                );
                // The change is applied; an audit failure is only reported.
                if let Err(audit_err) = self
                    .audit
                    .log_succeeded(&run_id, remediation.id(), resource_id, duration_ms)
                    .await
                {
                    tracing::error!(error = %audit_err, "Failed to record remediation success");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    remediation = remediation.id(),
                    resource = resource_id,
                    error = %err,
                    "Remediation failed"
                );
                // The action's error is what the caller needs; an audit
                // failure here is only reported.
                if let Err(audit_err) = self
                    .audit
                    .log_failed(
                        Some(&run_id),
                        remediation.id(),
                        resource_id,
                        &err.to_string(),
                        Some(duration_ms),
                    )
                    .await
                {
                    tracing::error!(error = %audit_err, "Failed to record remediation failure");
                }
                Err(err)
            }
        }
    }

    /// Handle a JSON invocation envelope.
    pub async fn handle(&self, invocation: Invocation) -> Result<serde_json::Value, RemediationError> {
        match invocation {
            Invocation::ListRemediations => Ok(serde_json::to_value(self.registry.list())?),
            Invocation::Remediate { payload } => {
                self.remediate(&payload).await?;
                Ok(serde_json::json!({}))
            }
        }
    }
}
