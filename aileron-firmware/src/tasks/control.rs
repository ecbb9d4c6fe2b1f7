//! Control-loop consumer task
//!
//! Polls the shared slot without ever blocking on the receiver, and
//! derives the advisory link-lost condition from the snapshot age.

use defmt::*;
use embassy_time::{Duration, Instant, Timer};

use crate::channels::IBUS_CHANNELS;

/// Control loop poll period
const LOOP_PERIOD: Duration = Duration::from_millis(20);

/// Snapshot age after which the link is treated as lost
const LINK_TIMEOUT_MS: u32 = 500;

/// Control task - consumes channel snapshots at its own cadence
#[embassy_executor::task]
pub async fn control_task() {
    info!("Control task started");

    let mut link_up = false;

    loop {
        if IBUS_CHANNELS.take_fresh() {
            let ch = IBUS_CHANNELS.peek();
            if !link_up {
                info!("iBus link up");
                link_up = true;
            }
            trace!(
                "roll={} pitch={} throttle={} yaw={}",
                ch.roll,
                ch.pitch,
                ch.throttle,
                ch.yaw
            );
        } else if link_up {
            let now = Instant::now().as_millis() as u32;
            if IBUS_CHANNELS.peek().age_ms(now) > LINK_TIMEOUT_MS {
                warn!("iBus link lost, holding last values");
                link_up = false;
            }
        }

        Timer::after(LOOP_PERIOD).await;
    }
}
