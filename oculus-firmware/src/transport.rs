//! Embassy-backed collaborators for the core crate

use defmt::*;
use embassy_time::Instant;

use oculus_core::traits::{Clock, Transport};

use crate::channels::{DisplayCommand, COMMAND_CHANNEL};

/// Queues commands for the display TX task
///
/// Never blocks. A command that does not fit, or arrives while the queue is
/// full, is dropped with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelTransport;

impl Transport for ChannelTransport {
    fn send(&self, bytes: &[u8]) {
        let Ok(cmd) = DisplayCommand::from_slice(bytes) else {
            warn!("Display command too long ({} bytes), dropping", bytes.len());
            return;
        };

        if COMMAND_CHANNEL.try_send(cmd).is_err() {
            warn!("Display channel full, dropping command");
        }
    }
}

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
