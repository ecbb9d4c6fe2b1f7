//! iBus servo frame validation and field extraction.
//!
//! Frame format (32 bytes, little-endian):
//! - LENGTH (1 byte): 0x20, the total frame length
//! - COMMAND (1 byte): 0x40 for servo channel data
//! - CHANNELS (20 bytes): 10 x u16 channel values
//! - RESERVED (8 bytes): unused by this mapping, still checksummed
//! - CHECKSUM (2 bytes): 0xFFFF minus the sum of the first 30 bytes
//!
//! The checksum is a 1's-complement-style additive sum, not a polynomial
//! CRC despite the common naming in transmitter documentation.

/// Fixed iBus frame length in bytes
pub const FRAME_LEN: usize = 32;

/// Command tag for servo channel data frames
pub const CMD_SERVO: u8 = 0x40;

/// Number of channels carried by a servo frame
pub const CHANNEL_COUNT: usize = 10;

/// Offset of the little-endian checksum within the frame
const CHECKSUM_OFFSET: usize = FRAME_LEN - 2;

/// Reasons a frame is rejected
///
/// Rejections are statistically expected line noise; callers discard the
/// frame and keep receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Length or command tag mismatch
    BadHeader,
    /// Stored checksum does not match the computed one
    BadChecksum,
}

/// Compute the checksum over the first 30 bytes of a frame.
pub fn checksum(frame: &[u8; FRAME_LEN]) -> u16 {
    frame[..CHECKSUM_OFFSET]
        .iter()
        .fold(0xFFFFu16, |acc, &b| acc.wrapping_sub(b as u16))
}

fn stored_checksum(frame: &[u8; FRAME_LEN]) -> u16 {
    u16::from_le_bytes([frame[CHECKSUM_OFFSET], frame[CHECKSUM_OFFSET + 1]])
}

/// Check a frame's header and checksum.
///
/// Accepts exactly the frames whose length tag is [`FRAME_LEN`], command
/// tag is [`CMD_SERVO`], and stored checksum matches the computed one.
pub fn validate(frame: &[u8; FRAME_LEN]) -> Result<(), FrameError> {
    if frame[0] != FRAME_LEN as u8 || frame[1] != CMD_SERVO {
        return Err(FrameError::BadHeader);
    }
    if checksum(frame) != stored_checksum(frame) {
        return Err(FrameError::BadChecksum);
    }
    Ok(())
}

/// Read channel `index` (0..[`CHANNEL_COUNT`]) from a frame.
pub fn channel(frame: &[u8; FRAME_LEN], index: usize) -> u16 {
    debug_assert!(index < CHANNEL_COUNT);
    u16::from_le_bytes([frame[2 + 2 * index], frame[3 + 2 * index]])
}

/// Extract all ten channel values in frame order.
pub fn extract_channels(frame: &[u8; FRAME_LEN]) -> [u16; CHANNEL_COUNT] {
    let mut values = [0u16; CHANNEL_COUNT];
    for (i, value) in values.iter_mut().enumerate() {
        *value = channel(frame, i);
    }
    values
}

/// Recompute and store the checksum of `frame` in place.
///
/// Useful for simulators and tests that edit frame bytes directly.
pub fn write_checksum(frame: &mut [u8; FRAME_LEN]) {
    let sum = checksum(frame);
    frame[CHECKSUM_OFFSET..].copy_from_slice(&sum.to_le_bytes());
}

/// Build a valid servo frame carrying `channels`.
///
/// Reserved bytes are zeroed. Intended for loopback tests and
/// transmitter simulators; the receiver side never constructs frames.
pub fn build_frame(channels: &[u16; CHANNEL_COUNT]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = FRAME_LEN as u8;
    frame[1] = CMD_SERVO;
    for (i, value) in channels.iter().enumerate() {
        frame[2 + 2 * i..4 + 2 * i].copy_from_slice(&value.to_le_bytes());
    }
    write_checksum(&mut frame);
    frame
}
