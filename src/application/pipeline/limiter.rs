use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

/// Default number of classification tasks allowed in flight
pub const DEFAULT_CAPACITY: usize = 150;

#[derive(Debug, Error)]
pub enum LimiterError {
    #[error("Concurrency limiter is closed")]
    Closed,
}

/// A task that panicked or was aborted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub reason: String,
}

/// Outcome of draining the limiter
#[derive(Debug, Default)]
pub struct LimiterReport {
    /// Tasks that ran to completion since the previous drain
    pub completed: usize,
    /// Tasks that panicked since the previous drain
    pub failures: Vec<TaskFailure>,
}

impl LimiterReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bounded pool of blocking tasks with a drain barrier.
///
/// `execute` waits for a free slot before spawning, so at most `capacity`
/// tasks are ever running. A slot is released when its task finishes,
/// including by panic, so a failing task cannot starve the dispatcher.
///
/// # Examples
///
/// ```rust,ignore
/// let mut limiter = ConcurrencyLimiter::new(150);
/// for record in records {
///     limiter.execute(move || classify(record)).await?;
/// }
/// let report = limiter.wait().await;
/// assert!(report.is_success());
/// ```
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
    capacity: usize,
    tasks: JoinSet<()>,
    report: LimiterReport,
}

impl ConcurrencyLimiter {
    /// Create a limiter; a capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
            tasks: JoinSet::new(),
            report: LimiterReport::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tasks currently holding a slot
    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }

    /// Schedule `task` on the blocking pool.
    ///
    /// Waits while the limiter is at capacity and returns as soon as the task
    /// has been spawned.
    pub async fn execute<F>(&mut self, task: F) -> Result<(), LimiterError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.reap_finished();

        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| LimiterError::Closed)?;

        self.tasks.spawn_blocking(move || {
            // Dropped on return or unwind
            let _permit = permit;
            task();
        });

        Ok(())
    }

    /// Block until every scheduled task has finished.
    ///
    /// Side effects of all tasks are visible to the caller once this returns.
    pub async fn wait(&mut self) -> LimiterReport {
        while let Some(result) = self.tasks.join_next().await {
            self.settle(result);
        }
        debug!(
            completed = self.report.completed,
            failed = self.report.failures.len(),
            "Limiter drained"
        );
        std::mem::take(&mut self.report)
    }

    /// Collect results of finished tasks so the join set does not grow with
    /// the length of the archive.
    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            self.settle(result);
        }
    }

    fn settle(&mut self, result: Result<(), JoinError>) {
        match result {
            Ok(()) => self.report.completed += 1,
            Err(e) => {
                let reason = describe_join_error(e);
                error!(reason = %reason, "Classification task failed");
                self.report.failures.push(TaskFailure { reason });
            }
        }
    }
}

fn describe_join_error(error: JoinError) -> String {
    if error.is_panic() {
        let payload = error.into_panic();
        if let Some(message) = payload.downcast_ref::<&str>() {
            format!("panicked: {}", message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            format!("panicked: {}", message)
        } else {
            "panicked".to_string()
        }
    } else {
        error.to_string()
    }
}
