//! Aileron Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the iBus receiver
//! core is written against. Chip-specific code (STM32 HAL callbacks,
//! RP2040 buffered UARTs, host-side mocks) implements these traits so the
//! same driver logic runs everywhere.
//!
//! # Traits
//!
//! - [`transport::FrameTransport`] - fixed-length serial frame reception
//! - [`clock::MonotonicClock`] - millisecond timekeeping

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use transport::{FrameTransport, SourceId};
