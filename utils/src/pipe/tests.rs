use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::pipe::Pipe;

#[tokio::test(flavor = "multi_thread")]
async fn test_rendezvous_delivers_in_fifo_order() {
  let pipe = Pipe::new(0);

  let producer = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      for i in 1..=10 {
        pipe.send(i).await;
      }
      pipe.close().await;
    })
  };

  let mut received = vec![];
  while let Some(value) = pipe.receive().await {
    received.push(value);
  }
  producer.await.unwrap();

  assert_eq!(received, (1..=10).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bounded_delivers_in_fifo_order() {
  let pipe = Pipe::new(20);

  let producer = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      for i in 1..=100 {
        pipe.send(i).await;
      }
      pipe.close().await;
    })
  };

  let mut received = vec![];
  while let Some(value) = pipe.receive().await {
    received.push(value);
  }
  producer.await.unwrap();

  assert_eq!(received, (1..=100).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_end_of_stream_is_terminal_and_idempotent() {
  let pipe = Pipe::new(4);
  pipe.send(1).await;
  pipe.send(2).await;
  pipe.close().await;

  assert_eq!(pipe.receive().await, Some(1));
  assert_eq!(pipe.receive().await, Some(2));
  for _ in 0..3 {
    assert_eq!(pipe.receive().await, None);
  }
  assert!(pipe.is_closed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_close_wakes_a_suspended_receiver() {
  let pipe: Pipe<i32> = Pipe::new(1);

  let consumer = {
    let pipe = pipe.clone();
    tokio::spawn(async move { pipe.receive().await })
  };

  sleep(Duration::from_millis(50)).await;
  pipe.close().await;

  assert_eq!(consumer.await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rendezvous_send_suspends_until_a_receive_takes_the_item() {
  let pipe = Pipe::new(0);
  let sent = Arc::new(AtomicBool::new(false));

  let sender = {
    let pipe = pipe.clone();
    let sent = sent.clone();
    tokio::spawn(async move {
      pipe.send(7).await;
      sent.store(true, Ordering::SeqCst);
    })
  };

  sleep(Duration::from_millis(100)).await;
  assert!(
    !sent.load(Ordering::SeqCst),
    "send returned with no receiver present"
  );

  assert_eq!(pipe.receive().await, Some(7));
  sender.await.unwrap();
  assert!(sent.load(Ordering::SeqCst));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bounded_send_suspends_while_the_buffer_is_full() {
  let pipe = Pipe::new(2);
  pipe.send(1).await;
  pipe.send(2).await;

  let sent = Arc::new(AtomicBool::new(false));
  let sender = {
    let pipe = pipe.clone();
    let sent = sent.clone();
    tokio::spawn(async move {
      pipe.send(3).await;
      sent.store(true, Ordering::SeqCst);
    })
  };

  sleep(Duration::from_millis(100)).await;
  assert!(
    !sent.load(Ordering::SeqCst),
    "send returned while the buffer was full"
  );

  assert_eq!(pipe.receive().await, Some(1));
  sender.await.unwrap();
  assert!(sent.load(Ordering::SeqCst));

  assert_eq!(pipe.receive().await, Some(2));
  assert_eq!(pipe.receive().await, Some(3));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_suspended_senders_are_released_in_fifo_order() {
  let pipe = Pipe::new(1);
  pipe.send(0).await;

  // Park the senders one at a time so their arrival order is fixed.
  let mut senders = vec![];
  for i in 1..=5 {
    let pipe = pipe.clone();
    senders.push(tokio::spawn(async move {
      pipe.send(i).await;
    }));
    sleep(Duration::from_millis(20)).await;
  }

  let mut received = vec![];
  for _ in 0..=5 {
    received.push(pipe.receive().await.unwrap());
  }
  for sender in senders {
    sender.await.unwrap();
  }

  assert_eq!(received, vec![0, 1, 2, 3, 4, 5]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_multiple_producers_deliver_everything() {
  let pipe = Pipe::new(5);

  let consumer = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      let mut received = vec![];
      while let Some(value) = pipe.receive().await {
        received.push(value);
      }
      received
    })
  };

  let mut producers = vec![];
  for p in 0..3 {
    let pipe = pipe.clone();
    producers.push(tokio::spawn(async move {
      for i in 0..20 {
        pipe.send(p * 20 + i).await;
      }
    }));
  }
  for producer in producers {
    producer.await.unwrap();
  }
  pipe.close().await;

  let mut received = consumer.await.unwrap();
  received.sort_unstable();
  assert_eq!(received, (0..60).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_len_counts_buffered_and_parked_items() {
  let pipe = Pipe::new(2);
  assert_eq!(pipe.capacity(), 2);
  assert!(pipe.is_empty().await);

  pipe.send(1).await;
  pipe.send(2).await;
  assert_eq!(pipe.len().await, 2);

  let sender = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      pipe.send(3).await;
    })
  };
  sleep(Duration::from_millis(50)).await;
  assert_eq!(pipe.len().await, 3);

  assert_eq!(pipe.receive().await, Some(1));
  sender.await.unwrap();
  assert_eq!(pipe.receive().await, Some(2));
  assert_eq!(pipe.receive().await, Some(3));
  assert!(pipe.is_empty().await);
}

#[tokio::test]
#[should_panic(expected = "send on closed pipe")]
async fn test_send_after_close_panics() {
  let pipe = Pipe::new(1);
  pipe.close().await;
  pipe.send(1).await;
}

#[tokio::test]
#[should_panic(expected = "pipe closed twice")]
async fn test_double_close_panics() {
  let pipe: Pipe<i32> = Pipe::new(1);
  pipe.close().await;
  pipe.close().await;
}
