//! Embassy async tasks
//!
//! Each task runs independently and communicates through the shared
//! channel slot in [`crate::channels`].

pub mod control;
pub mod ibus;

pub use control::control_task;
pub use ibus::ibus_rx_task;
