//! Display UART transmit task
//!
//! Drains the command channel onto the display UART.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::COMMAND_CHANNEL;

/// Display TX task - writes queued commands to the display
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx) {
    info!("Display TX task started");

    loop {
        let cmd = COMMAND_CHANNEL.receive().await;

        if let Err(e) = tx.write_all(&cmd).await {
            warn!("Failed to send display command: {:?}", e);
        } else {
            trace!("TX: {} bytes", cmd.len());
        }
    }
}
