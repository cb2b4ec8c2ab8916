//! Per-resource logging sink injected into every endpoint.

use std::future::Future;

use tracing::{Instrument, Span};

use crate::error::AppResult;
use crate::models::ResourceKind;

/// Tags log records with the resource and the operation being served.
///
/// Records go through `tracing`; the subscriber is installed once by the
/// binary, so an `EndpointLogger` holds no writer of its own.
#[derive(Debug, Clone, Copy)]
pub struct EndpointLogger {
    resource: &'static str,
}

impl EndpointLogger {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            resource: kind.name(),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Span wrapping one operation on this resource.
    pub fn operation(&self, operation: &'static str) -> Span {
        tracing::info_span!("resource", resource = self.resource, operation)
    }

    pub fn mounted(&self, path: &str, read_only: bool) {
        tracing::debug!(resource = self.resource, path, read_only, "Resource endpoint mounted");
    }

    /// Runs `work` inside the operation span and logs how it ended.
    ///
    /// Client errors are logged at warn, everything else at error.
    pub async fn observe<T, F>(&self, operation: &'static str, work: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        async {
            let result = work.await;
            match &result {
                Ok(_) => tracing::debug!("Operation completed"),
                Err(e) if e.is_client_error() => tracing::warn!(error = %e, "Operation rejected"),
                Err(e) => tracing::error!(error = ?e, "Operation failed"),
            }
            result
        }
        .instrument(self.operation(operation))
        .await
    }
}
