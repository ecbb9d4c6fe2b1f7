//! Inter-task shared state
//!
//! One static slot per transport line. Written only by the iBus RX task,
//! read only by the control task, per the single-writer/single-reader
//! discipline of the slot.

use aileron_driver::SharedChannels;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Latest validated channel set from the iBus receiver
pub static IBUS_CHANNELS: SharedChannels<CriticalSectionRawMutex> = SharedChannels::new();
