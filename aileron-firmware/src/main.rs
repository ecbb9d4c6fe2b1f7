//! Aileron - iBus receiver demo firmware
//!
//! RP2040 binary showing the async deployment of the receiver core:
//! one buffered-UART task feeds validated frames into the shared channel
//! slot, one control-loop task consumes snapshots at its own cadence.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Aileron firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // iBus runs at a fixed 115200 8N1
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    // The receiver wire is RX-only; TX stays unused
    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("UART initialized for iBus reception");

    spawner.spawn(tasks::ibus_rx_task(rx)).unwrap();
    spawner.spawn(tasks::control_task()).unwrap();
}
