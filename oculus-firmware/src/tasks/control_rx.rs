//! Host control UART receive task
//!
//! Receives request lines from the dialogue controller and applies them
//! through the display facade.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use oculus_core::{DisplayFacade, Mood};
use oculus_protocol::{ControlRequest, LineAssembler, Utf8Passthrough};

use crate::transport::ChannelTransport;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Facade wired to the display channel
pub type EyeFacade = DisplayFacade<'static, ChannelTransport, Utf8Passthrough>;

/// Control RX task - receives and applies host requests
#[embassy_executor::task]
pub async fn control_rx_task(mut rx: BufferedUartRx, facade: &'static EyeFacade) {
    info!("Control RX task started");

    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.feed(byte) {
                        Ok(Some(line)) => match ControlRequest::parse_bytes(&line) {
                            Ok(request) => handle_request(facade, request),
                            Err(e) => warn!("Bad control line: {:?}", e),
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Control line dropped: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Apply a parsed control request
fn handle_request(facade: &EyeFacade, request: ControlRequest<'_>) {
    match request {
        ControlRequest::Mood(name) => {
            let mood = Mood::from(name);
            if facade.set_mood(mood) {
                info!("Mood -> {:?}", mood);
            } else {
                debug!("Mood {:?} ignored while forced closed", mood);
            }
        }
        ControlRequest::Close => {
            info!("Force close");
            facade.force_close();
        }
        ControlRequest::Open => {
            info!("Force open");
            facade.force_open();
        }
        ControlRequest::Subtitle(text) => {
            if let Err(e) = facade.send_subtitle(text) {
                warn!("Subtitle not sent: {:?}", e);
            }
        }
    }
}
