//! Error types for remediation actions.

use remediate_audit::AuditError;
use remediate_core::InputError;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::session::Service;

/// A failed call against a cloud API.
///
/// Carries the service error code and message as returned by the provider;
/// the SDK error is kept as the source.
#[derive(Debug)]
pub struct ApiError {
    pub service: Service,
    pub operation: &'static str,
    /// Provider error code (e.g. `DBInstanceNotFound`), when the call got a
    /// service response.
    pub code: Option<String>,
    pub message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ApiError {
    pub fn new(
        service: Service,
        operation: &'static str,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            service,
            operation,
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying SDK error.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} failed", self.service, self.operation)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Everything that can stop a remediation.
#[derive(Debug, Error)]
pub enum RemediationError {
    /// Resource descriptor or parameters were unusable. No call was made.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The session factory could not produce a client.
    #[error("failed to create {service} client: {message}")]
    Session { service: Service, message: String },

    /// The provider rejected or failed the call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No remediation is registered under this id.
    #[error("unknown remediation '{0}'")]
    UnknownRemediation(String),

    /// The run could not be recorded as requested. Nothing was called.
    #[error("audit trail: {0}")]
    Audit(#[from] AuditError),

    /// A response could not be encoded.
    #[error("failed to encode response: {0}")]
    Response(#[from] serde_json::Error),
}

impl RemediationError {
    /// Provider error code, if this is an API failure that carried one.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code() {
        let err = ApiError::new(
            Service::Rds,
            "ModifyDBInstance",
            Some("DBInstanceNotFound".to_string()),
            "DBInstance db-1 not found.",
        );
        assert_eq!(
            err.to_string(),
            "rds:ModifyDBInstance failed (DBInstanceNotFound): DBInstance db-1 not found."
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn api_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "dispatch timed out");
        let err = ApiError::new(Service::Rds, "ModifyDBInstance", None, "dispatch failure")
            .with_source(io);
        assert_eq!(err.to_string(), "rds:ModifyDBInstance failed: dispatch failure");
        assert_eq!(err.source().unwrap().to_string(), "dispatch timed out");

        let wrapped = RemediationError::from(err);
        assert_eq!(wrapped.api_code(), None);
    }

    #[test]
    fn encoding_failure_is_its_own_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RemediationError::from(json_err);
        assert!(matches!(err, RemediationError::Response(_)));
        assert!(err.to_string().starts_with("failed to encode response"));
        assert_eq!(err.api_code(), None);
    }
}
