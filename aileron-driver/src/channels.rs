//! Decoded channel state.

use aileron_protocol::{ChannelMap, CHANNEL_COUNT};

/// Midpoint of the raw stick range, in iBus units (typically 1000..2000)
pub const STICK_CENTER: u16 = 1500;

/// Low end of the raw range, used for throttle and switches at startup
pub const STICK_LOW: u16 = 1000;

/// One decoded channel set.
///
/// Raw iBus magnitudes; no scaling or direction interpretation happens
/// here. `frame_ok` says the values came from a validated frame; it is
/// not a freshness indicator, that is tracked separately by
/// [`SharedChannels`](crate::state::SharedChannels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels {
    pub roll: u16,
    pub pitch: u16,
    pub throttle: u16,
    pub yaw: u16,
    pub switch1: u16,
    pub switch2: u16,
    pub switch3: u16,
    pub switch4: u16,
    pub switch5: u16,
    pub switch6: u16,
    /// Timestamp of the accepting commit, monotonic milliseconds
    pub last_update_ms: u32,
    /// True once any validated frame has been committed
    pub frame_ok: bool,
}

impl Channels {
    /// Power-on values: centered sticks, minimum throttle, switches low.
    pub const fn startup() -> Self {
        Self {
            roll: STICK_CENTER,
            pitch: STICK_CENTER,
            throttle: STICK_LOW,
            yaw: STICK_CENTER,
            switch1: STICK_LOW,
            switch2: STICK_LOW,
            switch3: STICK_LOW,
            switch4: STICK_LOW,
            switch5: STICK_LOW,
            switch6: STICK_LOW,
            last_update_ms: 0,
            frame_ok: false,
        }
    }

    /// Build a channel set from raw frame values through `map`.
    ///
    /// `map` indices must be valid per [`ChannelMap::is_valid`].
    pub fn from_raw(raw: &[u16; CHANNEL_COUNT], map: &ChannelMap, now_ms: u32) -> Self {
        Self {
            roll: raw[map.roll],
            pitch: raw[map.pitch],
            throttle: raw[map.throttle],
            yaw: raw[map.yaw],
            switch1: raw[map.switches[0]],
            switch2: raw[map.switches[1]],
            switch3: raw[map.switches[2]],
            switch4: raw[map.switches[3]],
            switch5: raw[map.switches[4]],
            switch6: raw[map.switches[5]],
            last_update_ms: now_ms,
            frame_ok: true,
        }
    }

    /// Milliseconds elapsed since this set was committed, wrap-safe.
    ///
    /// Staleness is advisory: the application compares this against its
    /// own threshold and decides on failsafe behavior itself.
    pub fn age_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_update_ms)
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::startup()
    }
}
