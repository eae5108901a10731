//! Background task infrastructure module

mod tokio_scheduler;

pub use tokio_scheduler::TokioTaskScheduler;

/// Create the default background task scheduler
pub fn create_scheduler() -> TokioTaskScheduler {
    TokioTaskScheduler::new()
}
