//! Concurrency primitives for Syncline.
//!
//! `concurrent` holds the counters and the join latch, `pipe` the FIFO
//! channel with an explicit closed state.

pub mod concurrent;
pub mod pipe;
