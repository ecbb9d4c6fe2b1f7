//! Property tests for the servo frame wire format.

use aileron_protocol::{build_frame, extract_channels, validate, write_checksum, FRAME_LEN};
use proptest::prelude::*;

proptest! {
    #[test]
    fn built_frames_validate(channels in prop::array::uniform10(any::<u16>()),
                             reserved in prop::array::uniform8(any::<u8>())) {
        let mut frame = build_frame(&channels);
        frame[22..30].copy_from_slice(&reserved);
        write_checksum(&mut frame);

        prop_assert_eq!(validate(&frame), Ok(()));
        prop_assert_eq!(extract_channels(&frame), channels);
    }

    #[test]
    fn single_bit_flip_rejected(channels in prop::array::uniform10(any::<u16>()),
                                bit in 0usize..(FRAME_LEN * 8)) {
        let mut frame = build_frame(&channels);
        frame[bit / 8] ^= 1 << (bit % 8);

        // Any single-bit corruption trips either the header check or the
        // additive checksum: a sub-256 delta never wraps to zero mod 2^16.
        prop_assert!(validate(&frame).is_err());
    }
}
