use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;


/// A lock-free counter backed by hardware fetch-and-add.
///
/// No lock is ever held: any number of workers may increment and read
/// concurrently without further coordination, and no increment is lost.
#[derive(Debug, Clone)]
pub struct AtomicCounter {
  value: Arc<AtomicU64>,
}

impl Eq for AtomicCounter {}

impl PartialEq for AtomicCounter {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.value, &other.value)
  }
}

impl Default for AtomicCounter {
  fn default() -> Self {
    Self::new()
  }
}

impl AtomicCounter {
  pub fn new() -> Self {
    Self {
      value: Arc::new(AtomicU64::new(0)),
    }
  }

  /// Adds one and returns the post-increment value. Never suspends.
  pub fn increment_and_get(&self) -> u64 {
    self.value.fetch_add(1, Ordering::SeqCst) + 1
  }

  /// Atomically reads the current value. Never observes a partially
  /// applied increment.
  pub fn load(&self) -> u64 {
    self.value.load(Ordering::SeqCst)
  }
}
