//! FlySky iBus servo frame format
//!
//! Wire-level layer for the iBus RC link: frame constants, header and
//! checksum validation, channel field extraction, and the positional
//! channel-to-function mapping.
//!
//! The functions here are pure and allocation-free so the same
//! validation path serves interrupt callbacks, async UART tasks,
//! simulators and host tests.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod map;

pub use frame::{
    build_frame, channel, checksum, extract_channels, validate, write_checksum, FrameError,
    CHANNEL_COUNT, CMD_SERVO, FRAME_LEN,
};
pub use map::ChannelMap;
