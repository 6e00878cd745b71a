use std::time::Duration;

use syncline_utils_rs::pipe::Pipe;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
  println!("Demo 1: rendezvous pipe, two workers passing 1..=10");
  let pipe = Pipe::new(0);
  let producer = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      for i in 1..=10 {
        pipe.send(i).await;
        sleep(Duration::from_millis(10)).await;
      }
      pipe.close().await;
    })
  };
  let consumer = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      while let Some(value) = pipe.receive().await {
        println!("received: {}", value);
      }
    })
  };
  producer.await.unwrap();
  consumer.await.unwrap();
  println!("Demo 1 done\n");

  println!("Demo 2: bounded pipe, 100 values through a buffer of 20");
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
  let consumer = {
    let pipe = pipe.clone();
    tokio::spawn(async move {
      while let Some(value) = pipe.receive().await {
        println!("received: {}", value);
      }
    })
  };
  producer.await.unwrap();
  consumer.await.unwrap();
  println!("Demo 2 done");
}
