use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_condvar::Condvar;

#[cfg(test)]
mod tests;

/// A one-shot join barrier.
///
/// `wait` suspends until `count_down` has been called as many times as the
/// initial count. An orchestrator creates the latch at the number of workers
/// it launches, each worker counts down once on completion, and the
/// orchestrator waits.
#[derive(Clone)]
pub struct CountDownLatch {
  count: Arc<Mutex<usize>>,
  condvar: Arc<Condvar>,
}

impl Debug for CountDownLatch {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CountDownLatch").field("count", &self.count).finish()
  }
}

impl Eq for CountDownLatch {}

impl PartialEq for CountDownLatch {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.count, &other.count)
  }
}

impl Default for CountDownLatch {
  fn default() -> Self {
    Self::new(0)
  }
}

impl CountDownLatch {
  pub fn new(count: usize) -> Self {
    Self {
      count: Arc::new(Mutex::new(count)),
      condvar: Arc::new(Condvar::new()),
    }
  }

  /// Records one completion. Counting down past zero indicates a
  /// bookkeeping bug in the caller and panics.
  pub async fn count_down(&self) {
    let mut count = self.count.lock().await;
    if *count == 0 {
      panic!("count_down called on an exhausted latch");
    }
    *count -= 1;
    if *count == 0 {
      self.condvar.notify_all();
    }
  }

  /// Suspends until the count reaches zero. Returns immediately if it
  /// already is zero.
  pub async fn wait(&self) {
    let mut count = self.count.lock().await;
    while *count > 0 {
      count = self.condvar.wait(count).await;
    }
  }

  /// Completions still outstanding.
  pub async fn count(&self) -> usize {
    *self.count.lock().await
  }
}
