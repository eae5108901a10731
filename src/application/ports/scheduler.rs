//! Background task scheduler port interface

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Scheduling errors
#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    #[error("Task name cannot be empty")]
    EmptyName,
}

/// A recurring background job. Must be cheap; it runs on the async runtime.
pub type TaskJob = Arc<dyn Fn() + Send + Sync>;

/// Port for recurring background tasks with an explicit lifecycle.
///
/// Registration is idempotent per name: registering a name that is already
/// running is a no-op. Unregistering an unknown name is a no-op as well, so
/// teardown paths can call it unconditionally.
#[async_trait]
pub trait TaskScheduler: Send + Sync {
    /// Register a named job to run every `min_interval`, starting one
    /// interval from now.
    async fn register(
        &self,
        name: &str,
        min_interval: Duration,
        job: TaskJob,
    ) -> Result<(), ScheduleError>;

    /// Stop and remove a named job.
    async fn unregister(&self, name: &str) -> Result<(), ScheduleError>;

    /// Check whether a named job is currently registered
    fn is_registered(&self, name: &str) -> bool;
}
