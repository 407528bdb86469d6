//! Audit event types.
//!
//! One event per lifecycle step of a remediation run:
//! requested, then succeeded or failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle step an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// A remediation was about to run.
    RemediationRequested,
    /// The remediation's call completed without error.
    RemediationSucceeded,
    /// The remediation failed (invalid input, unknown id, or API error).
    RemediationFailed,
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemediationRequested => write!(f, "REQUESTED"),
            Self::RemediationSucceeded => write!(f, "SUCCEEDED"),
            Self::RemediationFailed => write!(f, "FAILED"),
        }
    }
}

/// One entry of the remediation audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub event_type: AuditEventType,

    /// Remediation identifier (e.g. "AWS.RDS.EnableAutoMinorVersionUpgrade").
    pub remediation_id: String,

    /// Identifier of the targeted resource.
    pub resource_id: String,

    /// Effective parameters, after defaults were applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,

    /// Duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Failure reason, on `RemediationFailed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Groups the events of a single run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        remediation_id: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            event_type,
            remediation_id: remediation_id.into(),
            resource_id: resource_id.into(),
            parameters: None,
            duration_ms: None,
            error: None,
            correlation_id: None,
        }
    }

    pub fn builder(
        event_type: AuditEventType,
        remediation_id: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> AuditEventBuilder {
        AuditEventBuilder::new(event_type, remediation_id, resource_id)
    }

    /// Format the event as a human-readable log line.
    ///
    /// Format: `[timestamp] EVENT_TYPE remediation=... resource=... [duration_ms=...] [error="..."]`
    pub fn to_log_line(&self) -> String {
        let mut line = format!(
            "[{}] {} remediation={} resource={}",
            self.occurred_at.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.event_type,
            self.remediation_id,
            self.resource_id,
        );

        if let Some(ref params) = self.parameters {
            line.push_str(&format!(" parameters={}", params));
        }

        if let Some(duration) = self.duration_ms {
            line.push_str(&format!(" duration_ms={}", duration));
        }

        if let Some(ref error) = self.error {
            line.push_str(&format!(" error=\"{}\"", error.replace('"', "'")));
        }

        line
    }
}

/// Builder for [`AuditEvent`].
#[derive(Debug)]
pub struct AuditEventBuilder {
    event: AuditEvent,
}

impl AuditEventBuilder {
    pub fn new(
        event_type: AuditEventType,
        remediation_id: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            event: AuditEvent::new(event_type, remediation_id, resource_id),
        }
    }

    pub fn parameters(mut self, params: serde_json::Value) -> Self {
        self.event.parameters = Some(params);
        self
    }

    pub fn duration_ms(mut self, duration: u64) -> Self {
        self.event.duration_ms = Some(duration);
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.event.error = Some(error.into());
        self
    }

    /// Ties this event to the other events of the same run.
    pub fn correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.event.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn build(self) -> AuditEvent {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_builder() {
        let event = AuditEvent::builder(
            AuditEventType::RemediationFailed,
            "AWS.RDS.EnableAutoMinorVersionUpgrade",
            "db-1",
        )
        .parameters(json!({"ApplyImmediately": "true"}))
        .duration_ms(15)
        .error("AccessDenied")
        .correlation_id("run-1")
        .build();

        assert_eq!(event.event_type, AuditEventType::RemediationFailed);
        assert_eq!(event.resource_id, "db-1");
        assert_eq!(event.duration_ms, Some(15));
        assert_eq!(event.error.as_deref(), Some("AccessDenied"));
        assert_eq!(event.correlation_id.as_deref(), Some("run-1"));
    }

    #[test]
    fn test_to_log_line() {
        let event = AuditEvent::builder(
            AuditEventType::RemediationFailed,
            "AWS.RDS.EnableAutoMinorVersionUpgrade",
            "db-1",
        )
        .error("instance \"db-1\" not found")
        .build();

        let line = event.to_log_line();
        assert!(line.contains("FAILED"));
        assert!(line.contains("remediation=AWS.RDS.EnableAutoMinorVersionUpgrade"));
        assert!(line.contains("resource=db-1"));
        assert!(line.contains("error=\"instance 'db-1' not found\""));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let event = AuditEvent::new(AuditEventType::RemediationRequested, "r", "db-1");
        let value = serde_json::to_value(&event).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["event_type"], json!("remediation_requested"));
        assert!(!obj.contains_key("error"));
        assert!(!obj.contains_key("duration_ms"));
        assert!(!obj.contains_key("correlation_id"));
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(AuditEventType::RemediationRequested.to_string(), "REQUESTED");
        assert_eq!(AuditEventType::RemediationSucceeded.to_string(), "SUCCEEDED");
        assert_eq!(AuditEventType::RemediationFailed.to_string(), "FAILED");
    }
}
