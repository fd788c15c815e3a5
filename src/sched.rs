//! One-shot deferred tasks.
//!
//! The server only ever schedules one kind of job (dropping a temporary bot
//! reply), but it goes through [`Scheduler`] so tests can drive the clock by
//! hand with [`ManualScheduler`] instead of sleeping.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use futures_util::future::BoxFuture;

pub type Task = BoxFuture<'static, ()>;

pub trait Scheduler: Send + Sync {
    /// Runs `task` once after `delay`, unless the handle is cancelled first.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

#[derive(Debug, Clone, Default)]
pub struct TaskHandle(Arc<AtomicBool>);

impl TaskHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_done(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Marks the task as taken. Returns false if it was cancelled or already ran.
    fn claim(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}

/// Sleeps on the tokio timer. Must be called from inside a runtime.
#[derive(Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::default();
        let claim = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if claim.claim() {
                task.await;
            }
        });
        handle
    }
}

#[derive(Default)]
pub struct ManualScheduler {
    inner: Mutex<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    pending: Vec<(Duration, TaskHandle, Task)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward and runs, in due order, every task that came due.
    pub async fn advance(&self, by: Duration) {
        let mut due = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.now += by;
            let now = inner.now;
            let (due, waiting): (Vec<_>, Vec<_>) =
                inner.pending.drain(..).partition(|(at, _, _)| *at <= now);
            inner.pending = waiting;
            due
        };
        due.sort_by_key(|(at, _, _)| *at);

        for (_, handle, task) in due {
            if handle.claim() {
                task.await;
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::default();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let at = inner.now + delay;
        inner.pending.push((at, handle.clone(), task));
        handle
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use futures_util::FutureExt;

    use super::*;

    fn counting(counter: &Arc<AtomicUsize>) -> Task {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        .boxed()
    }

    #[tokio::test]
    async fn fires_once_after_delay() {
        let sched = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        sched.schedule(Duration::from_secs(5), counting(&counter));

        sched.advance(Duration::from_secs(4)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        sched.advance(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        sched.advance(Duration::from_secs(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(sched.pending(), 0);
    }

    #[tokio::test]
    async fn cancelled_task_never_runs() {
        let sched = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let handle = sched.schedule(Duration::from_secs(5), counting(&counter));
        handle.cancel();

        sched.advance(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(handle.is_done());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_fires() {
        let counter = Arc::new(AtomicUsize::new(0));
        TokioScheduler.schedule(Duration::from_secs(5), counting(&counter));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
