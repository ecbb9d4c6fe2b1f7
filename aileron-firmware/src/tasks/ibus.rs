//! iBus UART receive task
//!
//! Reads 32-byte servo frames from the buffered UART, validates them and
//! publishes accepted channel sets into the shared slot.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Instant;
use embedded_io_async::Read;

use aileron_driver::Channels;
use aileron_protocol::{extract_channels, validate, ChannelMap, FRAME_LEN};

use crate::channels::IBUS_CHANNELS;

/// iBus RX task - receives, validates and publishes servo frames
#[embassy_executor::task]
pub async fn ibus_rx_task(mut rx: BufferedUartRx) {
    info!("iBus RX task started");

    let map = ChannelMap::AETR;
    let mut frame = [0u8; FRAME_LEN];

    loop {
        // Align on the length tag. Frames are separated by idle gaps, so
        // a one-byte scan resynchronizes within a single frame time.
        let mut tag = [0u8; 1];
        if rx.read_exact(&mut tag).await.is_err() {
            continue;
        }
        if tag[0] != FRAME_LEN as u8 {
            continue;
        }

        frame[0] = tag[0];
        if rx.read_exact(&mut frame[1..]).await.is_err() {
            continue;
        }

        match validate(&frame) {
            Ok(()) => {
                let raw = extract_channels(&frame);
                let now = Instant::now().as_millis() as u32;
                IBUS_CHANNELS.publish(Channels::from_raw(&raw, &map, now));
            }
            Err(e) => {
                // Line noise is expected; keep receiving
                trace!("iBus frame rejected: {:?}", e);
            }
        }
    }
}
