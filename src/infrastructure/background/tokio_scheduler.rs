//! Tokio-backed recurring task scheduler

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::application::ports::{ScheduleError, TaskJob, TaskScheduler};

/// Scheduler that runs each registered job on its own tokio interval task.
///
/// Jobs keep running until they are unregistered or the scheduler is
/// dropped. The first run happens one interval after registration.
pub struct TokioTaskScheduler {
    tasks: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl TokioTaskScheduler {
    /// Create a new scheduler with no registered tasks
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for TokioTaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskScheduler for TokioTaskScheduler {
    async fn register(
        &self,
        name: &str,
        min_interval: Duration,
        job: TaskJob,
    ) -> Result<(), ScheduleError> {
        if name.is_empty() {
            return Err(ScheduleError::EmptyName);
        }

        let mut tasks = self.tasks.lock().unwrap();
        if tasks.contains_key(name) {
            debug!("task '{name}' is already registered");
            return Ok(());
        }

        let task_name = name.to_string();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(min_interval);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                debug!("running background task '{task_name}'");
                job();
            }
        });

        tasks.insert(name.to_string(), handle);
        Ok(())
    }

    async fn unregister(&self, name: &str) -> Result<(), ScheduleError> {
        let handle = self.tasks.lock().unwrap().remove(name);
        match handle {
            Some(handle) => handle.abort(),
            None => debug!("task '{name}' was not registered"),
        }
        Ok(())
    }

    fn is_registered(&self, name: &str) -> bool {
        self.tasks.lock().unwrap().contains_key(name)
    }
}

impl Drop for TokioTaskScheduler {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for (_, handle) in tasks.drain() {
                handle.abort();
            }
        }
    }
}
