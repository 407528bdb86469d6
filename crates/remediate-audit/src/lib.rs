//! # remediate-audit
//!
//! Audit trail for remediation invocations.
//!
//! Every run of a remediation produces a `RemediationRequested` event
//! followed by either `RemediationSucceeded` or `RemediationFailed`. The
//! events of one run share a `correlation_id`.
//!
//! - **File output**: JSON Lines (one JSON object per line)
//! - **Console output**: Human-readable line on stderr
//! - **Memory**: queryable in-process buffer
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use remediate_audit::AuditLogger;
//! use remediate_core::{AuditConfig, Parameters};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let logger = AuditLogger::new(AuditConfig::default())?;
//!
//! let params = Parameters::new().with("ApplyImmediately", "true");
//! let run = logger
//!     .log_requested("AWS.RDS.EnableAutoMinorVersionUpgrade", "db-1", &params)
//!     .await?;
//! logger
//!     .log_succeeded(&run, "AWS.RDS.EnableAutoMinorVersionUpgrade", "db-1", 120)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod event;
pub mod logger;
pub mod storage;

pub use error::AuditError;
pub use event::{AuditEvent, AuditEventBuilder, AuditEventType};
pub use logger::{AuditFilter, AuditLogger};
pub use storage::{AuditStorage, ConsoleStorage, FileStorage, MemoryStorage, NullStorage, TeeStorage};
