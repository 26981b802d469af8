//! Inter-task communication channels
//!
//! Display commands are produced by the animator and the control link and
//! drained by the display TX task, which owns the UART.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use oculus_protocol::MAX_SUBTITLE_COMMAND_LEN;

/// Channel capacity for outgoing display commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// One encoded display command, ready for the wire
pub type DisplayCommand = Vec<u8, MAX_SUBTITLE_COMMAND_LEN>;

/// Encoded commands waiting for the display UART
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, DisplayCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();
