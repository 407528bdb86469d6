//! [`AuditLogger`]: one helper per step of a remediation run.

use chrono::{DateTime, Utc};
use remediate_core::{AuditConfig, Parameters};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AuditError;
use crate::event::{AuditEvent, AuditEventType};
use crate::storage::{AuditStorage, ConsoleStorage, FileStorage, NullStorage, TeeStorage};

/// The main audit logger.
#[derive(Clone)]
pub struct AuditLogger {
    enabled: bool,
    storage: Arc<dyn AuditStorage>,
}

impl AuditLogger {
    /// Create a new audit logger with the given configuration.
    ///
    /// `file` and `stdout` combine. With neither set, events go to the
    /// console.
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let storage: Arc<dyn AuditStorage> = match (&config.file, config.stdout) {
            (Some(path), false) => Arc::new(FileStorage::new(path)?),
            (Some(path), true) => {
                let file: Arc<dyn AuditStorage> = Arc::new(FileStorage::new(path)?);
                let console: Arc<dyn AuditStorage> = Arc::new(ConsoleStorage::new());
                Arc::new(TeeStorage::new(vec![file, console]))
            }
            (None, _) => Arc::new(ConsoleStorage::new()),
        };

        Ok(Self {
            enabled: true,
            storage,
        })
    }

    /// Create a logger with a custom storage backend.
    pub fn with_storage(storage: Arc<dyn AuditStorage>) -> Self {
        Self {
            enabled: true,
            storage,
        }
    }

    /// Create a disabled (no-op) logger.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            storage: Arc::new(NullStorage::new()),
        }
    }

    /// Check if logging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log an audit event.
    pub async fn log(&self, event: AuditEvent) -> Result<(), AuditError> {
        if !self.enabled {
            return Ok(());
        }

        tracing::debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            remediation = %event.remediation_id,
            resource = %event.resource_id,
            "Audit event"
        );

        self.storage.store(event).await
    }

    /// Log that a remediation is about to run.
    ///
    /// Returns the correlation id to pass to the matching
    /// [`log_succeeded`](Self::log_succeeded) / [`log_failed`](Self::log_failed).
    pub async fn log_requested(
        &self,
        remediation_id: &str,
        resource_id: &str,
        parameters: &Parameters,
    ) -> Result<String, AuditError> {
        let correlation_id = Uuid::new_v4().to_string();
        let event = AuditEvent::builder(
            AuditEventType::RemediationRequested,
            remediation_id,
            resource_id,
        )
        .parameters(serde_json::to_value(parameters)?)
        .correlation_id(correlation_id.as_str())
        .build();

        self.log(event).await?;
        Ok(correlation_id)
    }

    /// Log a completed remediation.
    pub async fn log_succeeded(
        &self,
        correlation_id: &str,
        remediation_id: &str,
        resource_id: &str,
        duration_ms: u64,
    ) -> Result<(), AuditError> {
        let event = AuditEvent::builder(
            AuditEventType::RemediationSucceeded,
            remediation_id,
            resource_id,
        )
        .duration_ms(duration_ms)
        .correlation_id(correlation_id)
        .build();

        self.log(event).await
    }

    /// Log a failed remediation. `correlation_id` is absent when the run was
    /// rejected before it was requested (e.g. unknown remediation id).
    pub async fn log_failed(
        &self,
        correlation_id: Option<&str>,
        remediation_id: &str,
        resource_id: &str,
        error: &str,
        duration_ms: Option<u64>,
    ) -> Result<(), AuditError> {
        let mut builder =
            AuditEvent::builder(AuditEventType::RemediationFailed, remediation_id, resource_id)
                .error(error);

        if let Some(id) = correlation_id {
            builder = builder.correlation_id(id);
        }
        if let Some(duration) = duration_ms {
            builder = builder.duration_ms(duration);
        }

        self.log(builder.build()).await
    }

    /// Query audit events with filters.
    pub async fn query(&self, filter: AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
        self.storage.query(filter).await
    }

    /// Get every event belonging to one run.
    pub async fn run_history(&self, correlation_id: &str) -> Result<Vec<AuditEvent>, AuditError> {
        self.query(AuditFilter {
            correlation_id: Some(correlation_id.to_string()),
            ..Default::default()
        })
        .await
    }
}

/// Filter for querying audit events.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Filter by remediation id.
    pub remediation_id: Option<String>,
    /// Filter by resource id.
    pub resource_id: Option<String>,
    /// Filter by event type.
    pub event_type: Option<AuditEventType>,
    /// Filter by run.
    pub correlation_id: Option<String>,
    /// Filter by start time.
    pub start_time: Option<DateTime<Utc>>,
    /// Filter by end time.
    pub end_time: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

impl AuditFilter {
    /// Whether a single event passes the filter (ignores limit/offset).
    pub fn matches(&self, event: &AuditEvent) -> bool {
        if let Some(ref id) = self.remediation_id {
            if &event.remediation_id != id {
                return false;
            }
        }
        if let Some(ref id) = self.resource_id {
            if &event.resource_id != id {
                return false;
            }
        }
        if let Some(event_type) = self.event_type {
            if event.event_type != event_type {
                return false;
            }
        }
        if let Some(ref id) = self.correlation_id {
            if event.correlation_id.as_ref() != Some(id) {
                return false;
            }
        }
        if let Some(start) = self.start_time {
            if event.occurred_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if event.occurred_at > end {
                return false;
            }
        }
        true
    }

    /// Filter, then apply offset and limit.
    pub fn apply(&self, events: impl IntoIterator<Item = AuditEvent>) -> Vec<AuditEvent> {
        events
            .into_iter()
            .filter(|e| self.matches(e))
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}
