//! Millisecond timekeeping abstraction

/// Monotonic millisecond clock.
///
/// Used to stamp accepted frames so the application can judge staleness.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch.
    ///
    /// Monotonically non-decreasing, wrapping at `u32::MAX`. Callers
    /// compare timestamps with wrapping subtraction so wraparound is
    /// harmless.
    fn now_millis(&self) -> u32;
}
