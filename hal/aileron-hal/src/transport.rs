//! Serial frame transport abstraction
//!
//! Provides the trait through which the receiver arms fixed-length
//! reception on a serial peripheral. Completion is delivered out of band
//! (interrupt callback or task wakeup), tagged with the [`SourceId`] of
//! the line that finished.

/// Identifies which transport line a completion signal came from.
///
/// Single-line deployments can use one fixed value; boards with several
/// serial peripherals assign a distinct id per line so a receiver can
/// ignore completions that are not its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceId(pub u8);

/// Fixed-length frame reception over a serial line.
///
/// Implementations arm the underlying peripheral (interrupt or DMA
/// driven) to fill the given buffer completely and deliver exactly one
/// completion signal when it is full. The buffer is mutated only by the
/// transport between the arm and the completion signal.
pub trait FrameTransport {
    /// Error type for arm operations
    type Error;

    /// Arm reception of exactly `buf.len()` bytes into `buf`.
    ///
    /// Must be called again after every completion to keep reception
    /// continuous. A failed arm is not retried by the caller; the
    /// transport reports such failures through its own channels.
    fn request_receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// The id this transport reports in its completion signals.
    fn source(&self) -> SourceId;
}
