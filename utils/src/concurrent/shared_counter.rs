use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tokio::sync::Mutex;


/// A counter whose increments are serialized by a mutual-exclusion lock.
///
/// Cloning returns a handle to the same counter. After all incrementing
/// workers have joined, the value equals exactly the number of `increment`
/// calls that were made, no matter how they interleaved.
#[derive(Clone)]
pub struct SharedCounter {
  value: Arc<Mutex<u64>>,
}

impl Debug for SharedCounter {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SharedCounter").field("value", &self.value).finish()
  }
}

impl Eq for SharedCounter {}

impl PartialEq for SharedCounter {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.value, &other.value)
  }
}

impl Default for SharedCounter {
  fn default() -> Self {
    Self::new()
  }
}

impl SharedCounter {
  pub fn new() -> Self {
    Self {
      value: Arc::new(Mutex::new(0)),
    }
  }

  /// Adds one to the counter. Any other `increment` on the same instance
  /// suspends until the lock is released.
  pub async fn increment(&self) {
    let mut value = self.value.lock().await;
    *value += 1;
  }

  /// Returns the current value. Meant to be read once all incrementing
  /// workers have joined.
  pub async fn value(&self) -> u64 {
    *self.value.lock().await
  }
}
