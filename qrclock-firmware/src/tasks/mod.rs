//! Embassy async tasks
//!
//! Each task runs independently and communicates through the statics in
//! [`crate::channels`].

pub mod clock;
pub mod input;
pub mod tick;

pub use clock::{clock_task, ClockResources};
pub use input::input_task;
pub use tick::tick_task;
