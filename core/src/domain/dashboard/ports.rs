use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    dashboard::{live::LiveDashboard, view::DashboardView},
};

/// Service trait for the live dashboard
#[cfg_attr(test, mockall::automock)]
pub trait DashboardService: Send + Sync {
    /// Reads both store paths once and renders the dashboard.
    fn dashboard_snapshot(&self) -> impl Future<Output = Result<DashboardView, CoreError>> + Send;

    /// Subscribes to both store paths.
    fn watch_dashboard(&self) -> Result<LiveDashboard, CoreError>;
}
