use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, health::entities::StoreHealthStatus};

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckService: Send + Sync {
    /// Probes the realtime store with a read of the scale path.
    fn readiness(&self) -> impl Future<Output = Result<StoreHealthStatus, CoreError>> + Send;
}
