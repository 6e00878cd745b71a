use std::time::Duration;

use tokio::time::sleep;

use crate::concurrent::CountDownLatch;

#[tokio::test(flavor = "multi_thread")]
async fn test_wait_suspends_until_all_workers_count_down() {
  let latch = CountDownLatch::new(3);

  for _ in 0..3 {
    let latch = latch.clone();
    tokio::spawn(async move {
      sleep(Duration::from_millis(20)).await;
      latch.count_down().await;
    });
  }

  latch.wait().await;
  assert_eq!(latch.count().await, 0);
}

#[tokio::test]
async fn test_wait_returns_immediately_at_zero() {
  CountDownLatch::new(0).wait().await;
  CountDownLatch::default().wait().await;
}

#[tokio::test]
async fn test_multiple_waiters_are_all_released() {
  let latch = CountDownLatch::new(1);

  let mut waiters = vec![];
  for _ in 0..4 {
    let latch = latch.clone();
    waiters.push(tokio::spawn(async move {
      latch.wait().await;
    }));
  }

  latch.count_down().await;
  for waiter in waiters {
    waiter.await.unwrap();
  }
}

#[tokio::test]
#[should_panic(expected = "exhausted latch")]
async fn test_count_down_past_zero_panics() {
  let latch = CountDownLatch::new(1);
  latch.count_down().await;
  latch.count_down().await;
}
