use syncline_utils_rs::concurrent::{AtomicCounter, SharedCounter};

#[tokio::main]
async fn main() {
  let workers = 10;
  let increments_per_worker = 1000;

  let shared = SharedCounter::new();
  let mut handles = vec![];
  for _ in 0..workers {
    let shared = shared.clone();
    handles.push(tokio::spawn(async move {
      for _ in 0..increments_per_worker {
        shared.increment().await;
      }
    }));
  }
  for handle in handles {
    handle.await.unwrap();
  }
  println!("Final counter (mutex): {}", shared.value().await);

  let atomic = AtomicCounter::new();
  let mut handles = vec![];
  for _ in 0..workers {
    let atomic = atomic.clone();
    handles.push(tokio::spawn(async move {
      for _ in 0..increments_per_worker {
        atomic.increment_and_get();
      }
    }));
  }
  for handle in handles {
    handle.await.unwrap();
  }
  println!("Final counter (atomic): {}", atomic.load());
}
