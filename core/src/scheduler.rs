//! Scheduler implementations and handles.

use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use syncline_utils_rs::concurrent::CountDownLatch;
use tokio::sync::Mutex;
use tokio::time::Instant;


/// An opaque zero-argument unit of work. Side effects only.
pub struct Task(Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send + 'static>);

impl Task {
  pub fn new<F, Fut>(f: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static, {
    Self(Box::new(move || Box::pin(f()) as BoxFuture<'static, ()>))
  }

  pub async fn run(self) {
    (self.0)().await;
  }
}

/// A fault raised by a task body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
  #[error("task panicked: {0}")]
  Panicked(String),
}

/// The outcome of one scheduled task: its position in the input sequence,
/// how long its body ran, and whether it completed or faulted.
#[derive(Debug)]
pub struct TaskResult {
  pub index: usize,
  pub duration: Duration,
  pub outcome: Result<(), TaskError>,
}

#[async_trait]
pub trait Scheduler: Debug + Send + Sync + 'static {
  /// Launches every task concurrently and suspends until all of them have
  /// finished. `results[i]` always describes `tasks[i]`, whatever the
  /// completion order. An empty input returns an empty output without
  /// launching anything.
  async fn schedule(&self, tasks: Vec<Task>) -> Vec<TaskResult>;
}

#[derive(Debug, Clone)]
pub struct SchedulerHandle(Arc<dyn Scheduler>);

impl SchedulerHandle {
  pub fn new_arc(scheduler: Arc<dyn Scheduler>) -> Self {
    Self(scheduler)
  }

  pub fn new(scheduler: impl Scheduler + 'static) -> Self {
    Self(Arc::new(scheduler))
  }
}

#[async_trait]
impl Scheduler for SchedulerHandle {
  async fn schedule(&self, tasks: Vec<Task>) -> Vec<TaskResult> {
    self.0.schedule(tasks).await
  }
}

// --- TaskScheduler implementation

/// Runs each task as its own tokio task on the ambient runtime and measures
/// per-task wall-clock duration.
///
/// A task that panics is reported in its own result slot; every other
/// result is unaffected and the join still completes.
#[derive(Debug, Clone)]
pub struct TaskScheduler;

impl TaskScheduler {
  pub fn new() -> Self {
    Self
  }
}

impl Default for TaskScheduler {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl Scheduler for TaskScheduler {
  async fn schedule(&self, tasks: Vec<Task>) -> Vec<TaskResult> {
    if tasks.is_empty() {
      return Vec::new();
    }

    let latch = CountDownLatch::new(tasks.len());
    // One slot per task; no slot is ever touched by two workers.
    let slots: Vec<Arc<Mutex<Option<TaskResult>>>> =
      (0..tasks.len()).map(|_| Arc::new(Mutex::new(None))).collect();

    tracing::debug!(tasks = slots.len(), "scheduling tasks");
    for (index, task) in tasks.into_iter().enumerate() {
      let latch = latch.clone();
      let slot = slots[index].clone();
      tokio::spawn(async move {
        let start = Instant::now();
        let outcome = AssertUnwindSafe(task.run())
          .catch_unwind()
          .await
          .map_err(|cause| TaskError::Panicked(panic_message(cause)));
        let duration = start.elapsed();
        if let Err(error) = &outcome {
          tracing::debug!(index, %error, "task faulted");
        }
        *slot.lock().await = Some(TaskResult {
          index,
          duration,
          outcome,
        });
        latch.count_down().await;
      });
    }

    latch.wait().await;

    let mut results = Vec::with_capacity(slots.len());
    for slot in slots {
      let result = slot.lock().await.take();
      results.push(result.expect("worker counted down without storing its result"));
    }
    results
  }
}

fn panic_message(cause: Box<dyn Any + Send>) -> String {
  if let Some(message) = cause.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = cause.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic payload".to_string()
  }
}
