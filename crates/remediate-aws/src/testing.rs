//! Recording fakes for the session and RDS seams.
//!
//! Lets remediations be exercised without credentials or network: the fakes
//! record every client request and every call, and can be told to fail.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{ApiError, RemediationError};
use crate::rds::{ModifyDbInstance, RdsApi};
use crate::session::{Service, ServiceClient, SessionFactory};

type ErrorFactory = dyn Fn() -> ApiError + Send + Sync;

/// [`RdsApi`] that records calls instead of sending them.
#[derive(Clone, Default)]
pub struct RecordingRds {
    calls: Arc<Mutex<Vec<ModifyDbInstance>>>,
    fail_with: Option<Arc<ErrorFactory>>,
}

impl RecordingRds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call is recorded, then answered with the error `make_error` builds.
    pub fn failing(make_error: impl Fn() -> ApiError + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::default(),
            fail_with: Some(Arc::new(make_error)),
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<ModifyDbInstance> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RdsApi for RecordingRds {
    async fn modify_db_instance(&self, request: ModifyDbInstance) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        match &self.fail_with {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }
}

/// [`SessionFactory`] that records which services were requested.
#[derive(Clone, Default)]
pub struct RecordingSession {
    rds: Option<RecordingRds>,
    unavailable: Option<String>,
    requested: Arc<Mutex<Vec<Service>>>,
}

impl RecordingSession {
    /// Hands out `rds` for [`Service::Rds`].
    pub fn with_rds(rds: RecordingRds) -> Self {
        Self {
            rds: Some(rds),
            ..Default::default()
        }
    }

    /// Fails every client request with `message`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            unavailable: Some(message.into()),
            ..Default::default()
        }
    }

    /// Services requested so far, in order.
    pub fn requested(&self) -> Vec<Service> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SessionFactory for RecordingSession {
    async fn client(&self, service: Service) -> Result<ServiceClient, RemediationError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(service);
        }
        if let Some(message) = &self.unavailable {
            return Err(RemediationError::Session {
                service,
                message: message.clone(),
            });
        }
        match (service, &self.rds) {
            (Service::Rds, Some(rds)) => Ok(ServiceClient::Rds(Arc::new(rds.clone()))),
            (Service::Rds, None) => Err(RemediationError::Session {
                service,
                message: "no fake configured".to_string(),
            }),
        }
    }
}
