use std::env;
use std::time::Duration;

use rand::Rng;
use syncline_core_rs::scheduler::{Scheduler, Task, TaskScheduler};
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
  if env::var("RUST_LOG").is_err() {
    env::set_var("RUST_LOG", "scheduler_demo=info");
  }
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  println!("Demo 1: odd and even printers");
  let odds = tokio::spawn(async {
    for i in (1..=10).step_by(2) {
      println!("odd: {}", i);
      sleep(Duration::from_millis(30)).await;
    }
  });
  let evens = tokio::spawn(async {
    for i in (2..=10).step_by(2) {
      println!("even: {}", i);
      sleep(Duration::from_millis(40)).await;
    }
  });
  odds.await.unwrap();
  evens.await.unwrap();

  println!("\nDemo 2: scheduler measuring task durations");
  let tasks: Vec<Task> = (1..=3)
    .map(|id| {
      Task::new(move || async move {
        let millis = rand::rng().random_range(100..=500);
        sleep(Duration::from_millis(millis)).await;
        println!("task {} done", id);
      })
    })
    .collect();

  let results = TaskScheduler::new().schedule(tasks).await;
  for result in &results {
    println!("task {} duration: {:?}", result.index + 1, result.duration);
  }
}
