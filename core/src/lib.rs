//! Concurrent task scheduling for Syncline.

pub mod scheduler;

pub use scheduler::*;
