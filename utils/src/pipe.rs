use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

#[cfg(test)]
mod tests;

/// A FIFO channel with an explicit closed state.
///
/// A capacity of zero makes the pipe a rendezvous: `send` suspends until a
/// receiver takes the item in the same instant and nothing is ever buffered.
/// A positive capacity gives a bounded buffer: `send` suspends only while
/// the buffer is full.
///
/// Items are delivered in exactly the order they were sent. Suspended
/// senders are released in the order they suspended, so a later send can
/// never overtake an earlier one even under a full buffer.
///
/// Cloning returns a handle to the same pipe; any number of producers and
/// consumers may share it.
pub struct Pipe<T> {
  capacity: usize,
  inner: Arc<Mutex<PipeInner<T>>>,
}

impl<T> Clone for Pipe<T> {
  fn clone(&self) -> Self {
    Self {
      capacity: self.capacity,
      inner: self.inner.clone(),
    }
  }
}

/// An item whose sender is suspended until the item is taken (rendezvous)
/// or promoted into the buffer (bounded).
struct ParkedSend<T> {
  item: T,
  ticket: Arc<Notify>,
}

struct PipeInner<T> {
  buffer: VecDeque<T>,
  parked: VecDeque<ParkedSend<T>>,
  recv_waiters: VecDeque<Arc<Notify>>,
  closed: bool,
}

impl<T> Debug for Pipe<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipe").field("capacity", &self.capacity).finish()
  }
}

impl<T> Pipe<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      capacity,
      inner: Arc::new(Mutex::new(PipeInner {
        buffer: VecDeque::new(),
        parked: VecDeque::new(),
        recv_waiters: VecDeque::new(),
        closed: false,
      })),
    }
  }

  /// Appends `item` to the tail of the pipe.
  ///
  /// Returns immediately when the buffer has room and no earlier sender is
  /// still suspended; otherwise suspends until the item has been handed
  /// over. Sending on a closed pipe is a contract violation and panics.
  pub async fn send(&self, item: T) {
    let ticket = {
      let mut inner = self.inner.lock().await;
      if inner.closed {
        panic!("send on closed pipe");
      }
      // The fast path stays disabled while anyone is parked, otherwise a
      // later send could overtake an earlier one.
      if self.capacity > 0 && inner.parked.is_empty() && inner.buffer.len() < self.capacity {
        inner.buffer.push_back(item);
        if let Some(waiter) = inner.recv_waiters.pop_front() {
          waiter.notify_one();
        }
        return;
      }
      let ticket = Arc::new(Notify::new());
      tracing::trace!(parked = inner.parked.len() + 1, "pipe sender suspended");
      inner.parked.push_back(ParkedSend {
        item,
        ticket: ticket.clone(),
      });
      if let Some(waiter) = inner.recv_waiters.pop_front() {
        waiter.notify_one();
      }
      ticket
    };
    ticket.notified().await;
  }

  /// Removes and returns the head item.
  ///
  /// Suspends while the pipe is empty and still open. Once the pipe is both
  /// empty and closed this returns `None`, and keeps returning `None` on
  /// every later call.
  pub async fn receive(&self) -> Option<T> {
    loop {
      let waiter = {
        let mut inner = self.inner.lock().await;
        if let Some(item) = inner.buffer.pop_front() {
          // A slot freed up; the oldest suspended sender gets it.
          if let Some(parked) = inner.parked.pop_front() {
            inner.buffer.push_back(parked.item);
            parked.ticket.notify_one();
          }
          return Some(item);
        }
        if let Some(parked) = inner.parked.pop_front() {
          // Rendezvous hand-off: take the item straight from the sender.
          parked.ticket.notify_one();
          return Some(parked.item);
        }
        if inner.closed {
          return None;
        }
        let waiter = Arc::new(Notify::new());
        inner.recv_waiters.push_back(waiter.clone());
        waiter
      };
      waiter.notified().await;
    }
  }

  /// Marks the pipe closed and wakes every suspended receiver so it can
  /// drain the remaining items and observe the end of the stream. Items
  /// sent before the close, including those of still-suspended senders, are
  /// delivered normally. Closing twice is a contract violation and panics.
  pub async fn close(&self) {
    let mut inner = self.inner.lock().await;
    if inner.closed {
      panic!("pipe closed twice");
    }
    inner.closed = true;
    tracing::debug!(
      pending = inner.buffer.len() + inner.parked.len(),
      "pipe closed"
    );
    for waiter in inner.recv_waiters.drain(..) {
      waiter.notify_one();
    }
  }

  /// Items awaiting delivery, counting both buffered items and items held
  /// by suspended senders.
  pub async fn len(&self) -> usize {
    let inner = self.inner.lock().await;
    inner.buffer.len() + inner.parked.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub async fn is_closed(&self) -> bool {
    self.inner.lock().await.closed
  }
}
