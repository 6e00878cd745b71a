mod atomic_counter;
mod count_down_latch;
mod shared_counter;

pub use self::{atomic_counter::*, count_down_latch::*, shared_counter::*};
