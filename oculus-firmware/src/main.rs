//! Oculus - Animated Eye Display Firmware
//!
//! Main firmware binary for RP2040 boards driving a serial HMI panel that
//! shows a pair of animated eyes and conversation subtitles.
//!
//! UART0 talks to the display, UART1 takes requests from the host dialogue
//! controller.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use oculus_core::{Animator, DisplayFacade, EyeState};
use oculus_protocol::Utf8Passthrough;

use crate::config::load_config;
use crate::tasks::EyeFacade;
use crate::transport::{ChannelTransport, EmbassyClock};

mod channels;
mod config;
mod tasks;
mod transport;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static DISPLAY_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DISPLAY_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static CONTROL_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static CONTROL_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Shared between the animator and the control task
static EYE_STATE: EyeState = EyeState::new();
static FACADE: StaticCell<EyeFacade> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Oculus firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display panel on UART0 (GPIO0 TX, GPIO1 RX), 115200 baud default
    let display_tx_buf = DISPLAY_TX_BUF.init([0u8; 256]);
    let display_rx_buf = DISPLAY_RX_BUF.init([0u8; 16]);
    let display_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let display_uart = display_uart.into_buffered(Irqs, display_tx_buf, display_rx_buf);
    // The panel never talks back
    let (display_tx, _display_rx) = display_uart.split();

    info!("UART0 initialized for display");

    // Host control link on UART1 (GPIO4 TX, GPIO5 RX)
    let control_tx_buf = CONTROL_TX_BUF.init([0u8; 16]);
    let control_rx_buf = CONTROL_RX_BUF.init([0u8; 256]);
    let control_uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, UartConfig::default());
    let control_uart = control_uart.into_buffered(Irqs, control_tx_buf, control_rx_buf);
    let (_control_tx, control_rx) = control_uart.split();

    info!("UART1 initialized for host control");

    let facade: &'static EyeFacade =
        FACADE.init(DisplayFacade::new(&EYE_STATE, ChannelTransport, Utf8Passthrough));

    let animator = Animator::new(
        &EYE_STATE,
        ChannelTransport,
        EmbassyClock,
        Delay,
        RoscRng,
        config,
    );

    // Spawn tasks
    spawner.spawn(tasks::display_tx_task(display_tx)).unwrap();
    spawner
        .spawn(tasks::control_rx_task(control_rx, facade))
        .unwrap();
    spawner.spawn(tasks::eye_animator_task(animator)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
