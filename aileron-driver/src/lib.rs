//! FlySky iBus receiver core
//!
//! One interrupt-level producer, one application-level consumer, no torn
//! reads in between. The receiver owns the raw frame buffer and the
//! transport; validated frames are decoded, remapped and published into a
//! [`SharedChannels`] slot the application polls at its own pace.
//!
//! ```text
//! transport completion ──▶ IbusReceiver::on_frame_complete
//!                              │ header + checksum check
//!                              │ extract + remap + timestamp
//!                              ▼
//!                        SharedChannels ◀── snapshot / peek / take_fresh
//!                              ▲                    (application)
//!                              └── re-arm reception
//! ```
//!
//! Rejected frames are silently discarded and reception is re-armed, so a
//! corrupt frame never stalls the link or leaves a half-written state.

#![no_std]
#![deny(unsafe_code)]

pub mod channels;
pub mod receiver;
pub mod state;

pub use channels::{Channels, STICK_CENTER, STICK_LOW};
pub use receiver::IbusReceiver;
pub use state::SharedChannels;
