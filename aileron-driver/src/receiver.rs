//! iBus frame receiver: reception arming, validation, decode, publish.

use aileron_hal::{FrameTransport, MonotonicClock, SourceId};
use aileron_protocol::{self as protocol, ChannelMap, FRAME_LEN};
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::channels::Channels;
use crate::state::SharedChannels;

/// Receives fixed-length iBus frames and publishes validated channel
/// sets into a [`SharedChannels`] slot.
///
/// Lives entirely in the receive context: the raw frame buffer is owned
/// here and never exposed, so the shared slot is the only surface the
/// application touches. One receiver per transport line; the
/// single-writer discipline of the slot is the receiver's to uphold.
///
/// Per frame cycle: armed -> receiving -> validating -> accepted or
/// rejected -> armed again. The transport guarantees one completion
/// signal at a time per buffer, so frames are never processed
/// concurrently.
pub struct IbusReceiver<'a, T, C, M>
where
    T: FrameTransport,
    C: MonotonicClock,
    M: RawMutex,
{
    transport: T,
    clock: C,
    map: ChannelMap,
    frame: [u8; FRAME_LEN],
    state: &'a SharedChannels<M>,
}

impl<'a, T, C, M> IbusReceiver<'a, T, C, M>
where
    T: FrameTransport,
    C: MonotonicClock,
    M: RawMutex,
{
    /// Create a receiver publishing into `state`.
    pub fn new(transport: T, clock: C, map: ChannelMap, state: &'a SharedChannels<M>) -> Self {
        debug_assert!(map.is_valid());
        Self {
            transport,
            clock,
            map,
            frame: [0u8; FRAME_LEN],
            state,
        }
    }

    /// Reset the shared slot to startup defaults and arm the first
    /// reception. Call once before the link is expected to deliver.
    pub fn init(&mut self) {
        self.state.reset();
        self.start();
    }

    /// Arm the transport for the next frame.
    ///
    /// A failed arm is not retried here; the transport surfaces such
    /// failures through its own channels and reception resumes on the
    /// next successful arm.
    pub fn start(&mut self) {
        let _ = self.transport.request_receive(&mut self.frame);
    }

    /// Handle a frame-complete signal from `source`.
    ///
    /// Call this from the transport's completion callback, or directly
    /// if the application owns the callback itself. Frames failing the
    /// header or checksum check are discarded without touching the
    /// shared slot, and reception is re-armed either way so one corrupt
    /// frame never stalls the link. A completion from a foreign source
    /// is ignored entirely; re-arming that line is its own receiver's
    /// job.
    pub fn on_frame_complete(&mut self, source: SourceId) {
        if source != self.transport.source() {
            return;
        }

        if protocol::validate(&self.frame).is_ok() {
            let raw = protocol::extract_channels(&self.frame);
            let now = self.clock.now_millis();
            self.state.publish(Channels::from_raw(&raw, &self.map, now));
        }

        self.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aileron_protocol::{build_frame, write_checksum, CHANNEL_COUNT};
    use core::cell::Cell;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use heapless::Deque;

    // Pulls in the host critical-section implementation
    use critical_section as _;

    const SOURCE: SourceId = SourceId(1);

    /// Completes each armed reception immediately from a frame queue.
    struct MockTransport {
        pending: Deque<[u8; FRAME_LEN], 8>,
        arm_count: usize,
    }

    impl MockTransport {
        fn with_frames(frames: &[[u8; FRAME_LEN]]) -> Self {
            let mut pending = Deque::new();
            for frame in frames {
                pending.push_back(*frame).unwrap();
            }
            Self {
                pending,
                arm_count: 0,
            }
        }
    }

    impl FrameTransport for &mut MockTransport {
        type Error = ();

        fn request_receive(&mut self, buf: &mut [u8]) -> Result<(), ()> {
            self.arm_count += 1;
            if let Some(frame) = self.pending.pop_front() {
                buf.copy_from_slice(&frame);
            }
            Ok(())
        }

        fn source(&self) -> SourceId {
            SOURCE
        }
    }

    struct TestClock {
        now: Cell<u32>,
    }

    impl TestClock {
        fn at(ms: u32) -> Self {
            Self { now: Cell::new(ms) }
        }
    }

    impl MonotonicClock for &TestClock {
        fn now_millis(&self) -> u32 {
            self.now.get()
        }
    }

    fn ramp_frame() -> [u8; FRAME_LEN] {
        let values: [u16; CHANNEL_COUNT] = core::array::from_fn(|i| 1000 + i as u16);
        build_frame(&values)
    }

    #[test]
    fn test_init_defaults_and_arms() {
        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(0);
        let mut transport = MockTransport::with_frames(&[]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
        }

        let ch = state.peek();
        assert_eq!(ch.roll, 1500);
        assert_eq!(ch.throttle, 1000);
        assert!(!ch.frame_ok);
        assert!(!state.take_fresh());
        assert_eq!(transport.arm_count, 1);
    }

    #[test]
    fn test_valid_frame_committed_with_remap_and_timestamp() {
        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(1234);
        let mut transport = MockTransport::with_frames(&[ramp_frame()]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
            rx.on_frame_complete(SOURCE);
        }

        assert!(state.take_fresh());
        let ch = state.snapshot();
        assert_eq!(ch.roll, 1000);
        assert_eq!(ch.pitch, 1001);
        assert_eq!(ch.throttle, 1002);
        assert_eq!(ch.yaw, 1003);
        assert_eq!(ch.switch1, 1004);
        assert_eq!(ch.switch6, 1009);
        assert_eq!(ch.last_update_ms, 1234);
        assert!(ch.frame_ok);
        // one arm from init, one re-arm after the accept
        assert_eq!(transport.arm_count, 2);
    }

    #[test]
    fn test_rejected_frame_preserves_previous_state() {
        let mut corrupt = ramp_frame();
        corrupt[30] ^= 0x01;

        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(50);
        let mut transport = MockTransport::with_frames(&[ramp_frame(), corrupt]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
            rx.on_frame_complete(SOURCE);
            let accepted = state.snapshot();

            clock.now.set(80);
            rx.on_frame_complete(SOURCE);

            // Prior accepted values survive untouched, frame_ok included
            assert_eq!(state.peek(), accepted);
            assert!(state.peek().frame_ok);
            assert_eq!(state.peek().last_update_ms, 50);
            assert!(!state.take_fresh());
        }

        // reception was re-armed despite the rejection
        assert_eq!(transport.arm_count, 3);
    }

    #[test]
    fn test_bad_header_rejected() {
        let mut frame = ramp_frame();
        frame[1] = 0x41;
        write_checksum(&mut frame);

        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(0);
        let mut transport = MockTransport::with_frames(&[frame]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
            rx.on_frame_complete(SOURCE);
        }

        assert!(!state.take_fresh());
        assert!(!state.peek().frame_ok);
    }

    #[test]
    fn test_reception_continues_after_rejection() {
        let mut corrupt = ramp_frame();
        corrupt[5] ^= 0x10;
        let good = build_frame(&[1800; CHANNEL_COUNT]);

        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(9);
        let mut transport = MockTransport::with_frames(&[corrupt, good]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
            rx.on_frame_complete(SOURCE);
            assert!(!state.take_fresh());

            rx.on_frame_complete(SOURCE);
        }

        // The valid frame after a rejected one still lands
        assert!(state.take_fresh());
        assert_eq!(state.snapshot().roll, 1800);
    }

    #[test]
    fn test_foreign_source_ignored_without_rearm() {
        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(0);
        let mut transport = MockTransport::with_frames(&[ramp_frame()]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
            rx.on_frame_complete(SourceId(2));
        }

        // Frame in the buffer is not processed and the line is not re-armed
        assert!(!state.take_fresh());
        assert!(!state.peek().frame_ok);
        assert_eq!(transport.arm_count, 1);
    }

    #[test]
    fn test_two_frames_before_read_coalesce_to_latest() {
        let first = build_frame(&[1100; CHANNEL_COUNT]);
        let second = build_frame(&[1900; CHANNEL_COUNT]);

        let state = SharedChannels::<CriticalSectionRawMutex>::new();
        let clock = TestClock::at(1);
        let mut transport = MockTransport::with_frames(&[first, second]);

        {
            let mut rx = IbusReceiver::new(&mut transport, &clock, ChannelMap::AETR, &state);
            rx.init();
            rx.on_frame_complete(SOURCE);
            clock.now.set(2);
            rx.on_frame_complete(SOURCE);
        }

        assert!(state.take_fresh());
        assert!(!state.take_fresh());
        let ch = state.snapshot();
        assert_eq!(ch.roll, 1900);
        assert_eq!(ch.last_update_ms, 2);
    }
}
