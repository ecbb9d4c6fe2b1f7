//! Positional channel-to-function mapping.

use crate::frame::CHANNEL_COUNT;

/// Maps frame channel indices to control functions.
///
/// Transmitters differ in stick order (AETR, TAER, ...); the map is the
/// single point of configuration, passed to the receiver at construction
/// so a different order requires no other code changes. All indices must
/// be below [`CHANNEL_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMap {
    pub roll: usize,
    pub pitch: usize,
    pub throttle: usize,
    pub yaw: usize,
    /// Auxiliary switch channels, in switch1..switch6 order
    pub switches: [usize; 6],
}

impl ChannelMap {
    /// AETR stick order: roll, pitch, throttle, yaw on channels 1-4,
    /// switches on channels 5-10. The FlySky factory default.
    pub const AETR: Self = Self {
        roll: 0,
        pitch: 1,
        throttle: 2,
        yaw: 3,
        switches: [4, 5, 6, 7, 8, 9],
    };

    /// True if every index addresses a valid frame channel.
    pub fn is_valid(&self) -> bool {
        let mut indices = [self.roll, self.pitch, self.throttle, self.yaw, 0, 0, 0, 0, 0, 0];
        indices[4..].copy_from_slice(&self.switches);
        indices.iter().all(|&i| i < CHANNEL_COUNT)
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::AETR
    }
}
