use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Timers owned by one session.
///
/// Every task hangs off a root cancellation token. Cancelling the root, or
/// dropping the owner, stops anything still waiting so no callback runs against
/// state that has been torn down.
#[derive(Debug, Default)]
pub struct ScheduledTasks {
    root: CancellationToken,
}

/// Cancels a single scheduled task without touching its siblings.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    token: CancellationToken,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl ScheduledTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay` unless cancelled first.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.root.child_token();
        let guard = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {
                    tracing::debug!("scheduled task cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    task.await;
                }
            }
        });
        TaskHandle { token }
    }

    /// Waits for `delay`. Returns false if the owner was cancelled meanwhile.
    pub fn sleep(&self, delay: Duration) -> impl Future<Output = bool> + Send + 'static {
        let token = self.root.child_token();
        async move {
            tokio::select! {
                _ = token.cancelled() => false,
                _ = tokio::time::sleep(delay) => true,
            }
        }
    }

    pub fn cancel_all(&self) {
        self.root.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.root.is_cancelled()
    }
}

impl Drop for ScheduledTasks {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_after_delay() {
        let tasks = ScheduledTasks::new();
        let fired = Arc::new(AtomicUsize::new(0));
        tasks.schedule(Duration::from_secs(3), counter_task(&fired));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_cancels_single_task() {
        let tasks = ScheduledTasks::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let first = tasks.schedule(Duration::from_secs(1), counter_task(&fired));
        tasks.schedule(Duration::from_secs(1), counter_task(&fired));
        first.cancel();
        assert!(first.is_cancelled());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let tasks = ScheduledTasks::new();
            tasks.schedule(Duration::from_secs(3), counter_task(&fired));
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_reports_cancellation() {
        let tasks = ScheduledTasks::new();
        let finished = tasks.sleep(Duration::from_millis(100));
        assert!(finished.await);

        let interrupted = tasks.sleep(Duration::from_secs(10));
        tasks.cancel_all();
        assert!(!interrupted.await);
        assert!(tasks.is_cancelled());
    }
}
