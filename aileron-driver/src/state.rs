//! Shared channel state with single-writer/single-reader hand-off.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::channels::Channels;

struct Inner {
    channels: Channels,
    fresh: bool,
}

/// Single-slot latest-value store for decoded channels.
///
/// The writer is the receive path (interrupt callback or rx task), the
/// reader is the application control loop; there is exactly one of each
/// per slot. Every publish and every read runs inside the blocking
/// mutex, so a reader always sees all fields of one commit, never a
/// mixture of two.
///
/// `new` is const, so slots can live in statics:
///
/// ```ignore
/// static IBUS: SharedChannels<CriticalSectionRawMutex> = SharedChannels::new();
/// ```
///
/// On single-core embedded targets `CriticalSectionRawMutex` briefly
/// masks interrupts around each access; hosts and multicore parts can
/// substitute another [`RawMutex`].
pub struct SharedChannels<M: RawMutex> {
    inner: Mutex<M, RefCell<Inner>>,
}

impl<M: RawMutex> SharedChannels<M> {
    /// Create a slot holding startup defaults, not fresh.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                channels: Channels::startup(),
                fresh: false,
            })),
        }
    }

    /// Replace the stored channel set and mark it fresh.
    ///
    /// Writer side only. Back-to-back publishes before a read coalesce:
    /// the reader sees the latest values and a single fresh indication.
    pub fn publish(&self, channels: Channels) {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            inner.channels = channels;
            inner.fresh = true;
        });
    }

    /// Restore startup defaults and clear the freshness flag.
    pub fn reset(&self) {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            inner.channels = Channels::startup();
            inner.fresh = false;
        });
    }

    /// Copy the latest committed channel set, clearing the freshness flag.
    pub fn snapshot(&self) -> Channels {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            inner.fresh = false;
            inner.channels
        })
    }

    /// Copy the latest committed channel set without touching freshness.
    ///
    /// Inspection aid for debug output and staleness checks. Control
    /// loops should consume data through [`snapshot`](Self::snapshot) or
    /// [`take_fresh`](Self::take_fresh) so freshness tracking stays
    /// accurate.
    pub fn peek(&self) -> Channels {
        self.inner.lock(|cell| cell.borrow().channels)
    }

    /// Read and clear the freshness flag.
    ///
    /// True means at least one validated frame was published since the
    /// last snapshot or flag read.
    pub fn take_fresh(&self) -> bool {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            core::mem::replace(&mut inner.fresh, false)
        })
    }
}

impl<M: RawMutex> Default for SharedChannels<M> {
    fn default() -> Self {
        Self::new()
    }
}
